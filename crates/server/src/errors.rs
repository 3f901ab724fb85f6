use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use promptsmith::{PromptError, StoreError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within
/// the server, allowing them to be converted into appropriate HTTP
/// responses.
pub enum AppError {
    /// A request rejected before any work was attempted.
    BadRequest(String),
    /// Errors originating from the prompt pipeline or a provider.
    Prompt(PromptError),
    /// Errors originating from the resource store.
    Store(StoreError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Prompt(err) => {
                // Log the original error for debugging purposes.
                error!("PromptError: {:?}", err);
                match err {
                    PromptError::MissingApiKey | PromptError::EmptyPrompt => {
                        (StatusCode::BAD_REQUEST, err.to_string())
                    }
                    PromptError::MissingAiProvider => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    // Gateway failures surface as pipeline failures.
                    PromptError::AiRequest(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Request to the model gateway failed: {e}"),
                    ),
                    PromptError::AiDeserialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to deserialize model gateway response: {e}"),
                    ),
                    PromptError::AiApi(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Model gateway error: {e}"),
                    ),
                    PromptError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::Store(err) => {
                error!("StoreError: {:?}", err);
                match err {
                    StoreError::InvalidFileName(_) | StoreError::UnsupportedExtension(_) => {
                        (StatusCode::BAD_REQUEST, err.to_string())
                    }
                    StoreError::CapacityExceeded(_) => (StatusCode::FORBIDDEN, err.to_string()),
                    StoreError::Io(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Resource store I/O error: {e}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
