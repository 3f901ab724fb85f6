use thiserror::Error;

/// Custom error types for the prompt pipeline.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the model gateway: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize model gateway response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("Model gateway returned an error: {0}")]
    AiApi(String),
    #[error("An AI provider must be configured")]
    MissingAiProvider,
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Prompt text is empty")]
    EmptyPrompt,
}
