//! Common types and utilities shared across the parsers.
//!
//! This module provides the unified error type and the XML text helpers used
//! by every part parser.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
