//! # Instruction Templates
//!
//! The instruction texts sent to the model gateway by the pipeline phases.

/// The translation instruction for Persian input (Phase 1).
pub const TRANSLATION_INSTRUCTION: &str = "Translate the following Persian text into SIMPLIFIED, CLARIFIED English. Return only the translation.";

/// The snippet translation instruction (English to simplified Persian).
pub const SNIPPET_TRANSLATION_INSTRUCTION: &str = "As a Professional translator you MUST translate from English To [SIMPLIFIED] and [CLARIFIED] and [UNDERSTANDABLE] Persian. Return ONLY the Persian translation.";

/// The generation instruction template (Phase 3).
///
/// Placeholders: `{context}` (the assembled knowledge base) and `{request}`
/// (the working request after optional translation).
pub const REFINEMENT_INSTRUCTION_TEMPLATE: &str = "You are an Elite Prompt Engineer.

INTERNAL KNOWLEDGE BASE:
{context}

TASK:
Refine this request: \"{request}\"

Create a highly optimized prompt.
OUTPUT: Markdown format only.";

/// The lightweight instruction used by the API key connectivity probe.
pub const VERIFY_INSTRUCTION: &str = "Test connection.";
