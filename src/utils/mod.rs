//! Shared utilities
//!
//! Error types and validation helpers used across the layers.

pub mod errors;
pub mod validation;
