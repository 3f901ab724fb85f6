pub mod gemini;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a remote generative-model gateway.
///
/// This defines a common interface over different backends (Gemini, local
/// OpenAI-compatible servers). The gateway is opaque: a call either returns
/// the generated text or fails with a [`PromptError`].
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response for `instruction`.
    ///
    /// `web_search` requests the optional tool-augmented capability. A
    /// provider may honor it, silently ignore it, or fail the call; callers
    /// must treat any failure uniformly.
    async fn generate(&self, instruction: &str, web_search: bool) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
