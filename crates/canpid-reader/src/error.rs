//! Reader error types.

use thiserror::Error;

use canpid_codec::DecodeError;
use canpid_transport::TransportError;

/// Errors from a single query round-trip.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Response timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Convenience alias for reader results.
pub type ReadResult<T> = Result<T, ReadError>;
