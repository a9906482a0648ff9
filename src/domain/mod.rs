//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `analysis` - Bug analysis payload, prompt construction and response normalization

pub mod analysis;
pub mod foundation;
