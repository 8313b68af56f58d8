//! CAN transport error types.

use thiserror::Error;

/// Errors that can occur while talking to the CAN bus.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open CAN interface {interface}: {reason}")]
    Open { interface: String, reason: String },

    #[error("CAN interface error: {0}")]
    Interface(String),

    #[error("Safety violation: mode 0x{mode:02X} is not allowed")]
    SafetyViolation { mode: u8 },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Interface(err.to_string())
    }
}

/// Convenience alias for transport results.
pub type TransportResult<T> = Result<T, TransportError>;
