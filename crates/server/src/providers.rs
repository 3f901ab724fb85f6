//! # Request-Scoped AI Provider Factory
//!
//! The model credential travels with each request rather than living in the
//! server configuration, so provider instances are built at request time
//! from the configured gateway plus the caller's key.

use crate::{config::ProviderConfig, errors::AppError};
use promptsmith::providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider};
use promptsmith::PromptError;
use tracing::debug;

/// Creates an AI provider for one request, using the caller-supplied key.
pub fn create_request_provider(
    config: &ProviderConfig,
    api_key: &str,
) -> Result<Box<dyn AiProvider>, AppError> {
    if api_key.trim().is_empty() {
        return Err(AppError::Prompt(PromptError::MissingApiKey));
    }

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            // If api_url is not provided in config, construct it from the model name.
            let api_url = config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key.to_string())?)
        }
        "local" => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "api_url is required for the local provider"
                ))
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                Some(api_key.to_string()),
                Some(config.model_name.clone()),
            )?)
        }
        other => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Unsupported AI provider type '{other}'"
            )))
        }
    };

    debug!(provider = %config.provider, "Built request-scoped AI provider");
    Ok(provider)
}
