//! End-to-end tests for the resource endpoints: listing, multipart upload,
//! the ingestion policy (extension and capacity), and clearing.

mod common;

use crate::common::TestApp;
use reqwest::multipart;
use serde_json::Value;
use std::fs;

async fn upload(app: &TestApp, name: &str, bytes: &[u8]) -> reqwest::Response {
    let part = multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string());
    let form = multipart::Form::new().part("file", part);
    app.client
        .post(format!("{}/upload_resource", app.address))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed")
}

#[tokio::test]
async fn resources_start_empty() {
    let app = TestApp::spawn().await.unwrap();

    let body: Value = app
        .client
        .get(format!("{}/get_resources", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count"], 0);
    assert_eq!(body["max"], 4);
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upload_then_list_round_trip() {
    let app = TestApp::spawn().await.unwrap();

    let response = upload(&app, "notes.txt", b"hello upload").await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["filename"], "notes.txt");
    assert_eq!(body["count"], 1);

    let listing: Value = app
        .client
        .get(format!("{}/get_resources", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["files"][0]["name"], "notes.txt");
    // ASCII content: reported size equals the byte length.
    assert_eq!(listing["files"][0]["size"], "hello upload".len());
}

#[tokio::test]
async fn upload_rejects_unsupported_file_types() {
    let app = TestApp::spawn().await.unwrap();

    let response = upload(&app, "script.exe", b"binary").await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("script.exe"));
}

#[tokio::test]
async fn upload_without_a_file_part_is_rejected() {
    let app = TestApp::spawn().await.unwrap();

    let form = multipart::Form::new().text("other_field", "no file here");
    let response = app
        .client
        .post(format!("{}/upload_resource", app.address))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn upload_at_capacity_returns_forbidden() {
    let app = TestApp::spawn().await.unwrap();

    for i in 0..4 {
        let response = upload(&app, &format!("file_{i}.txt"), b"content").await;
        assert!(response.status().is_success());
    }

    let response = upload(&app, "one_too_many.txt", b"content").await;
    assert_eq!(response.status(), 403);

    // The rejected file never reached the directory.
    assert!(!app.resources_dir.join("one_too_many.txt").exists());
}

#[tokio::test]
async fn clear_resources_empties_directory_and_listing() {
    let app = TestApp::spawn().await.unwrap();
    for i in 0..3 {
        upload(&app, &format!("file_{i}.txt"), b"content").await;
    }

    let body: Value = app
        .client
        .post(format!("{}/clear_resources", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 0);

    assert_eq!(fs::read_dir(&app.resources_dir).unwrap().count(), 0);

    // A follow-up list triggers a lazy sync against the now-empty
    // directory and must still succeed.
    let listing: Value = app
        .client
        .get(format!("{}/get_resources", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn externally_dropped_files_appear_on_next_read() {
    let app = TestApp::spawn().await.unwrap();

    // A file lands in the directory without going through the API.
    fs::write(app.resources_dir.join("external.txt"), "dropped in").unwrap();

    let listing: Value = app
        .client
        .get(format!("{}/get_resources", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["files"][0]["name"], "external.txt");
}
