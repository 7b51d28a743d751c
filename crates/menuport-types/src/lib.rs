//! Shared document, error, and run-summary types for menuport.
//!
//! This crate stays dependency-light so the engine, the CLI, and test
//! doubles can all use it without pulling in the HTTP stack.

pub mod document;
pub mod error;
pub mod summary;

pub use document::{columns, KeyMode, MenuItem};
pub use error::{RowError, RowErrorKind, StoreError};
pub use summary::RunSummary;
