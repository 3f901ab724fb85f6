//! # Prompt Refinement Core
//!
//! This crate provides the core of the prompt refinement backend: a bounded,
//! disk-backed [`store::ResourceStore`] built from heterogeneous document
//! formats, and a multi-phase [`pipeline::PromptPipeline`] that turns a short
//! user request into a refined prompt via a configurable AI provider.

pub mod constants;
pub mod errors;
pub mod extract;
pub mod language;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod store;

pub use errors::PromptError;
pub use pipeline::{PipelineOutcome, PromptPipeline, PromptPipelineBuilder};
pub use store::{Resource, ResourceStore, StoreError};
