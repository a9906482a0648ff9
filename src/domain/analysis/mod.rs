//! Analysis module - bug analysis vocabulary.
//!
//! Pure domain code: the structured [`AnalysisPayload`], the prompts that ask
//! a model for one, and the normalizer that turns model text back into it.

mod normalizer;
mod payload;
pub mod prompts;

pub use normalizer::{fallback_payload, normalize, FALLBACK_SUMMARY_CHARS};
pub use payload::{AnalysisPayload, Priority, Severity, UserStoryContext};
