//! # Common Test Utilities
//!
//! The `TestApp` harness spawns the real server on a random port, backed by
//! a scratch resource directory and an `httpmock` mock server standing in
//! for the model gateway.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use promptsmith_server::{config, run};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub resources_dir: PathBuf,
    _resources_dir: TempDir,
    _config_dir: TempDir,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    ///
    /// The server is configured with the "gemini" provider type pointed at
    /// the mock gateway, so request bodies carry the `google_search` tool
    /// marker when the pipeline asks for tool-augmented generation.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let resources_tmp = TempDir::new()?;

        let config_dir = TempDir::new()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
resources_dir: "{}"
provider:
  provider: "gemini"
  api_url: "{}"
  model_name: "mock-chat-model"
"#,
            resources_tmp.path().display(),
            mock_server.url("/v1beta/models/mock:generateContent"),
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            if let Err(e) = run(listener, config).await {
                eprintln!("Server error: {e}");
            }
        });

        // Give the server a moment to start.
        sleep(Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            resources_dir: resources_tmp.path().to_path_buf(),
            _resources_dir: resources_tmp,
            _config_dir: config_dir,
        })
    }
}

/// Builds a Gemini-shaped success body carrying `text`.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
}
