//! Bridge error types
//!
//! Errors surfaced by sessions and packet sinks. The adapter never returns
//! these to the logging caller; they are redirected to the error hook along
//! with a [`FailureCode`].

use std::io;

use sift_protocol::ProtocolError;
use thiserror::Error;

use crate::hook::FailureCode;

/// Result type for session and sink operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while producing or forwarding packets
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Output could not be opened
    #[error("failed to open output '{path}': {source}")]
    Open {
        /// Path of the output
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Writing a formatted packet failed
    #[error("failed to write packet: {0}")]
    Write(#[source] io::Error),

    /// Flushing the output failed
    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),

    /// The sink was closed before the packet arrived
    #[error("packet sink is closed")]
    Closed,

    /// A packet could not be built
    #[error("invalid packet: {0}")]
    Protocol(#[from] ProtocolError),

    /// The session panicked while handling an event
    #[error("session panicked: {0}")]
    Panicked(String),
}

impl BridgeError {
    /// Create an Open error
    pub fn open(path: impl Into<String>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a Panicked error from a panic payload
    pub fn panicked(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked(message)
    }

    /// Failure code reported to the error hook
    pub fn code(&self) -> FailureCode {
        match self {
            Self::Open { .. } => FailureCode::Open,
            Self::Write(_) => FailureCode::Write,
            Self::Flush(_) => FailureCode::Flush,
            Self::Closed => FailureCode::Close,
            Self::Protocol(_) => FailureCode::Format,
            Self::Panicked(_) => FailureCode::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error() {
        let err = BridgeError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert_eq!(err.to_string(), "failed to write packet: pipe");
        assert_eq!(err.code(), FailureCode::Write);
    }

    #[test]
    fn test_open_error() {
        let err = BridgeError::open(
            "/var/log/sift.log",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/var/log/sift.log"));
        assert_eq!(err.code(), FailureCode::Open);
    }

    #[test]
    fn test_protocol_error_converts() {
        let err: BridgeError = ProtocolError::invalid_header_key("a=b").into();
        assert!(err.to_string().contains("invalid packet"));
        assert_eq!(err.code(), FailureCode::Format);
    }

    #[test]
    fn test_panicked_from_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        let err = BridgeError::panicked(payload.as_ref());
        assert_eq!(err.to_string(), "session panicked: boom");
        assert_eq!(err.code(), FailureCode::Generic);

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(
            BridgeError::panicked(payload.as_ref()).to_string(),
            "session panicked: owned"
        );
    }

    #[test]
    fn test_closed_and_flush_codes() {
        assert_eq!(BridgeError::Closed.code(), FailureCode::Close);
        let err = BridgeError::Flush(io::Error::other("disk"));
        assert_eq!(err.code(), FailureCode::Flush);
    }
}
