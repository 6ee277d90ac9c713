//! Unified error types for sheetmark.
//!
//! This module provides a single error type covering container access, XML
//! parsing, sheet resolution and configuration failures.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, Result};
