//! # Prompt Generation Pipeline
//!
//! A three-phase sequential pipeline over one [`AiProvider`]:
//! conditional translation, context assembly, and generation with a one-time
//! fallback when the tool-augmented call fails. Each phase consumes the
//! prior phase's output; only the generation phase is ever retried, and only
//! once with the tool capability disabled.

use crate::constants::RESOURCE_CONTEXT_BUDGET;
use crate::errors::PromptError;
use crate::language::needs_translation;
use crate::prompts::{
    REFINEMENT_INSTRUCTION_TEMPLATE, SNIPPET_TRANSLATION_INSTRUCTION, TRANSLATION_INSTRUCTION,
    VERIFY_INSTRUCTION,
};
use crate::providers::ai::AiProvider;
use crate::store::Resource;
use tracing::{info, warn};

/// The final refined prompt plus human-readable metadata notes.
///
/// Ephemeral: returned once to the caller, never stored server-side.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub text: String,
    pub meta: Vec<String>,
}

/// Orchestrates translation, context assembly, and generation.
#[derive(Clone, Debug)]
pub struct PromptPipeline {
    ai_provider: Box<dyn AiProvider>,
}

/// A builder for [`PromptPipeline`].
#[derive(Debug, Default)]
pub struct PromptPipelineBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
}

impl PromptPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider the pipeline issues its calls through.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<PromptPipeline, PromptError> {
        Ok(PromptPipeline {
            ai_provider: self.ai_provider.ok_or(PromptError::MissingAiProvider)?,
        })
    }
}

impl PromptPipeline {
    /// Runs the full pipeline over `user_prompt` and a store snapshot.
    ///
    /// State machine: `START -> (TRANSLATE | SKIP) -> ASSEMBLE_CONTEXT ->
    /// GENERATE_WITH_TOOLS -> (SUCCESS | GENERATE_NO_TOOLS -> (SUCCESS |
    /// FAILURE))`. Translation failures are fatal; only the generation call
    /// gets the one-time no-tools retry.
    pub async fn refine(
        &self,
        user_prompt: &str,
        resources: &[Resource],
    ) -> Result<PipelineOutcome, PromptError> {
        if user_prompt.trim().is_empty() {
            return Err(PromptError::EmptyPrompt);
        }

        let mut meta = Vec::new();

        // Phase 1: conditional translation.
        let working_prompt = if needs_translation(user_prompt) {
            info!("[refine] Persian input detected, translating");
            let instruction = format!("{TRANSLATION_INSTRUCTION}\n\n{user_prompt}");
            let translated = self.ai_provider.generate(&instruction, false).await?;
            meta.push(format!("Translated input: '{user_prompt}'"));
            translated
        } else {
            user_prompt.to_string()
        };

        // Phase 2: context assembly.
        let context = assemble_context(resources);
        if !resources.is_empty() {
            meta.push(format!("Utilized {} internal resources.", resources.len()));
        }

        // Phase 3: generation with capability fallback.
        let instruction = REFINEMENT_INSTRUCTION_TEMPLATE
            .replace("{context}", &context)
            .replace("{request}", &working_prompt);

        let text = match self.ai_provider.generate(&instruction, true).await {
            Ok(text) => text,
            Err(tool_error) => {
                warn!("Tool usage failed ({tool_error}), retrying without tools");
                self.ai_provider.generate(&instruction, false).await?
            }
        };

        Ok(PipelineOutcome { text, meta })
    }

    /// Translates an English snippet into simplified Persian.
    ///
    /// A single-phase instance of the pipeline: one call, no tools, no
    /// retry.
    pub async fn translate_snippet(&self, text: &str) -> Result<String, PromptError> {
        if text.trim().is_empty() {
            return Err(PromptError::EmptyPrompt);
        }
        let instruction = format!("{SNIPPET_TRANSLATION_INSTRUCTION}\n\nText to translate: {text}");
        self.ai_provider.generate(&instruction, false).await
    }

    /// Probes the gateway with a trivial generation to validate the
    /// caller-supplied credential.
    pub async fn verify(&self) -> Result<(), PromptError> {
        self.ai_provider
            .generate(VERIFY_INSTRUCTION, false)
            .await
            .map(|_| ())
    }
}

/// Builds the labeled context block from a store snapshot.
///
/// Each resource contributes a `--- RESOURCE: <name> ---` header followed by
/// its text truncated to [`RESOURCE_CONTEXT_BUDGET`] characters, in snapshot
/// order. The total is not capped: a full store can still produce up to
/// `MAX_RESOURCES x budget` characters, so callers that face a stricter
/// model limit must cap again at the gateway boundary.
pub fn assemble_context(resources: &[Resource]) -> String {
    let mut context = String::new();
    for resource in resources {
        let truncated: String = resource
            .text
            .chars()
            .take(RESOURCE_CONTEXT_BUDGET)
            .collect();
        context.push_str(&format!(
            "\n--- RESOURCE: {} ---\n{}\n",
            resource.file_name, truncated
        ));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str, text: &str) -> Resource {
        Resource {
            file_name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn context_is_empty_for_an_empty_snapshot() {
        assert_eq!(assemble_context(&[]), "");
    }

    #[test]
    fn context_labels_resources_in_snapshot_order() {
        let resources = vec![resource("a.txt", "hello"), resource("b.txt", "world")];
        let context = assemble_context(&resources);

        let a = context.find("--- RESOURCE: a.txt ---").unwrap();
        let b = context.find("--- RESOURCE: b.txt ---").unwrap();
        assert!(a < b);
        assert!(context.contains("hello"));
        assert!(context.contains("world"));
    }

    #[test]
    fn context_truncates_each_resource_to_the_budget() {
        let long_text = "x".repeat(RESOURCE_CONTEXT_BUDGET + 1000);
        let resources = vec![resource("big.txt", &long_text)];
        let context = assemble_context(&resources);

        let body_len = context.matches('x').count();
        assert_eq!(body_len, RESOURCE_CONTEXT_BUDGET);
    }

    #[test]
    fn context_truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not split; the cap is in characters.
        let long_text = "ثبت".repeat(RESOURCE_CONTEXT_BUDGET);
        let resources = vec![resource("fa.txt", &long_text)];
        let context = assemble_context(&resources);

        let header_and_framing = assemble_context(&[resource("fa.txt", "")]);
        let body_chars = context.chars().count() - header_and_framing.chars().count();
        assert_eq!(body_chars, RESOURCE_CONTEXT_BUDGET);
    }
}
