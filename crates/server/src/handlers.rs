//! # API Route Handlers
//!
//! The Axum route handlers for the resource endpoints and the generation
//! endpoints. Handlers stay thin: validation and marshaling here, all real
//! work in the `promptsmith` library.

use crate::{errors::AppError, providers::create_request_provider, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;
use promptsmith::constants::MAX_RESOURCES;
use promptsmith::store::ResourceSummary;
use promptsmith::PromptPipelineBuilder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

/// The root handler.
pub async fn root() -> &'static str {
    "promptsmith server is running."
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

// --- Resource endpoints ---

/// The response body for `GET /get_resources`.
#[derive(Serialize)]
pub struct ResourceListResponse {
    files: Vec<ResourceSummary>,
    count: usize,
    max: usize,
}

/// Returns the current list of loaded resources.
pub async fn get_resources_handler(
    State(app_state): State<AppState>,
) -> Result<Json<ResourceListResponse>, AppError> {
    let files = app_state.store.list().await?;
    let count = files.len();
    Ok(Json(ResourceListResponse {
        files,
        count,
        max: MAX_RESOURCES,
    }))
}

/// The response body for `POST /upload_resource`.
#[derive(Serialize)]
pub struct UploadResponse {
    message: String,
    filename: String,
    count: usize,
}

/// Ingests one uploaded file into the resource store.
pub async fn upload_resource_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
        }
    }

    let data = data.ok_or_else(|| AppError::BadRequest("No file part".to_string()))?;
    let file_name = file_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("No selected file".to_string()))?;

    info!("Received upload '{file_name}' ({} bytes)", data.len());
    let count = app_state.store.add(&file_name, &data).await?;

    Ok(Json(UploadResponse {
        message: "File processed successfully".to_string(),
        filename: file_name,
        count,
    }))
}

/// Deletes every resource on disk and empties the store.
pub async fn clear_resources_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    app_state.store.clear_all().await;
    Ok(Json(json!({
        "message": "All resources cleared",
        "count": 0,
    })))
}

// --- Generation endpoints ---

/// The request body for `POST /generate_prompt`.
#[derive(Deserialize)]
pub struct GeneratePromptRequest {
    pub api_key: Option<String>,
    pub prompt: Option<String>,
}

/// The response body for `POST /generate_prompt`.
#[derive(Serialize)]
pub struct GeneratePromptResponse {
    result: String,
    meta: Vec<String>,
}

/// Runs the full refinement pipeline over the caller's prompt and the
/// current store snapshot.
pub async fn generate_prompt_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GeneratePromptRequest>,
) -> Result<Json<GeneratePromptResponse>, AppError> {
    let (api_key, prompt) = match (payload.api_key.as_deref(), payload.prompt.as_deref()) {
        (Some(key), Some(prompt)) if !key.trim().is_empty() && !prompt.trim().is_empty() => {
            (key, prompt)
        }
        _ => return Err(AppError::BadRequest("Missing API Key or Prompt".to_string())),
    };
    info!("Received generation request: '{prompt}'");

    let provider = create_request_provider(&app_state.config.provider, api_key)?;
    let pipeline = PromptPipelineBuilder::new().ai_provider(provider).build()?;

    let snapshot = app_state.store.snapshot().await?;
    let outcome = pipeline.refine(prompt, &snapshot).await?;

    Ok(Json(GeneratePromptResponse {
        result: outcome.text,
        meta: outcome.meta,
    }))
}

/// The request body for `POST /translate_snippet`.
#[derive(Deserialize)]
pub struct TranslateSnippetRequest {
    pub api_key: Option<String>,
    pub text: Option<String>,
}

/// Translates selected text to simplified Persian.
pub async fn translate_snippet_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<TranslateSnippetRequest>,
) -> Result<Json<Value>, AppError> {
    let (api_key, text) = match (payload.api_key.as_deref(), payload.text.as_deref()) {
        (Some(key), Some(text)) if !key.trim().is_empty() && !text.trim().is_empty() => (key, text),
        _ => return Err(AppError::BadRequest("Missing API Key or Text".to_string())),
    };

    let provider = create_request_provider(&app_state.config.provider, api_key)?;
    let pipeline = PromptPipelineBuilder::new().ai_provider(provider).build()?;

    let translation = pipeline.translate_snippet(text).await?;
    Ok(Json(json!({ "translation": translation })))
}

/// The request body for `POST /verify_key`.
#[derive(Deserialize)]
pub struct VerifyKeyRequest {
    pub api_key: Option<String>,
}

/// Tests the caller's API key by making a lightweight gateway call.
pub async fn verify_key_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<VerifyKeyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Some(api_key) = payload
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
    else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "valid": false, "message": "API Key is missing" })),
        ));
    };

    let provider = create_request_provider(&app_state.config.provider, api_key)?;
    let pipeline = PromptPipelineBuilder::new().ai_provider(provider).build()?;

    match pipeline.verify().await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({ "valid": true, "message": "Connection Successful" })),
        )),
        Err(e) => {
            warn!("Key verification failed: {e}");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({ "valid": false, "message": e.to_string() })),
            ))
        }
    }
}
