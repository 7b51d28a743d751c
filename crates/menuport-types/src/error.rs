//! Structured error model for row processing and document writes.
//!
//! [`RowError`] is the per-row failure taxonomy: the import loop counts
//! these and keeps going. [`StoreError`] classifies failures from the
//! document store and is the payload of [`RowError::Write`].

use thiserror::Error;

/// Classified failure from the document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key was unusable or the token exchange was refused.
    #[error("[auth] {0}")]
    Auth(String),
    /// Transport-level failure talking to the service.
    #[error("[network] {0}")]
    Network(String),
    /// The service refused the request (e.g. an identifier it rejects).
    #[error("[rejected] HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Row-level failure. Never fatal: the import loop records it and
/// advances to the next row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// A required source column is absent from the row.
    #[error("missing required column '{column}'")]
    MissingField { column: &'static str },
    /// A field expected to be numeric failed to parse.
    #[error("invalid number in column '{column}': '{value}'")]
    InvalidNumber {
        column: &'static str,
        value: String,
    },
    /// The upsert against the document store failed.
    #[error("write failed: {0}")]
    Write(#[from] StoreError),
}

/// Cause bucket of a [`RowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowErrorKind {
    MissingField,
    InvalidNumber,
    Write,
}

impl RowError {
    pub fn kind(&self) -> RowErrorKind {
        match self {
            Self::MissingField { .. } => RowErrorKind::MissingField,
            Self::InvalidNumber { .. } => RowErrorKind::InvalidNumber,
            Self::Write(_) => RowErrorKind::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display_names_the_column() {
        let err = RowError::MissingField { column: "表示順" };
        assert_eq!(err.to_string(), "missing required column '表示順'");
        assert_eq!(err.kind(), RowErrorKind::MissingField);
    }

    #[test]
    fn invalid_number_display_carries_the_raw_value() {
        let err = RowError::InvalidNumber {
            column: "脂質",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid number in column '脂質': 'abc'");
        assert_eq!(err.kind(), RowErrorKind::InvalidNumber);
    }

    #[test]
    fn store_error_converts_into_write_bucket() {
        let store = StoreError::Rejected {
            status: 400,
            message: "bad document id".to_string(),
        };
        let err: RowError = store.into();
        assert_eq!(err.kind(), RowErrorKind::Write);
        assert_eq!(
            err.to_string(),
            "write failed: [rejected] HTTP 400: bad document id"
        );
    }

    #[test]
    fn store_error_display_is_bracket_classified() {
        assert_eq!(
            StoreError::Auth("token exchange refused".to_string()).to_string(),
            "[auth] token exchange refused"
        );
        assert_eq!(
            StoreError::Network("timed out".to_string()).to_string(),
            "[network] timed out"
        );
    }
}
