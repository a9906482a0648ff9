//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by the analysis domain and the
//! application handlers.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
