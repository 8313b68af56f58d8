//! OBD-II PID codec for single-frame, 11-bit CAN.
//!
//! Encodes Mode/PID queries into the fixed 8-byte diagnostic request frame and
//! decodes response frames into physical values. Everything here is a pure
//! function over caller-owned values; I/O lives in `canpid-transport`.

pub mod bitmap;
pub mod decode;
pub mod encode;
pub mod error;
pub mod types;

pub use bitmap::{PidSupport, decode_supported_pids};
pub use decode::{DecodedValue, decode, is_decodable};
pub use encode::encode;
pub use error::{DecodeError, DecodeResult};
pub use types::*;
