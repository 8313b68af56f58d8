//! Codec error types.

use thiserror::Error;

/// Errors that can occur while decoding an OBD-II response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated frame: PID 0x{pid:02X} needs {required} bytes, got {actual}")]
    TruncatedFrame { pid: u8, required: u8, actual: u8 },

    #[error("no decoding formula for PID 0x{pid:02X}")]
    UnsupportedPid { pid: u8 },
}

/// Convenience alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;
