//! # Shared Constants
//!
//! Centralized limits and defaults shared by the store, the pipeline, and
//! the server crate.

/// The maximum number of resources the store will hold at any time.
pub const MAX_RESOURCES: usize = 4;

/// The per-resource character budget applied during context assembly.
///
/// Each resource is truncated to this many characters before it is injected
/// into the generation instruction. There is deliberately no cap on the
/// assembled total across resources.
pub const RESOURCE_CONTEXT_BUDGET: usize = 40_000;

/// File extensions the resource store accepts for ingestion.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "pdf", "epub"];
