//! Protocol error types
//!
//! Errors that can occur when constructing or mutating packets.

use thiserror::Error;

/// Errors that can occur during packet construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A required discriminant was never set on a builder
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A raw value does not name any variant of a discriminant enum
    #[error("invalid {kind} value: {value}")]
    InvalidDiscriminant {
        /// Enum being decoded (e.g. "ProcessFlowType")
        kind: &'static str,
        /// Raw value that was rejected
        value: i32,
    },

    /// A log header key is empty or contains a line break or '='
    #[error("invalid log header key: {0:?}")]
    InvalidHeaderKey(String),
}

impl ProtocolError {
    /// Create a missing field error
    #[inline]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Create an invalid discriminant error
    #[inline]
    pub fn invalid_discriminant(kind: &'static str, value: i32) -> Self {
        Self::InvalidDiscriminant { kind, value }
    }

    /// Create an invalid header key error
    #[inline]
    pub fn invalid_header_key(key: impl Into<String>) -> Self {
        Self::InvalidHeaderKey(key.into())
    }
}
