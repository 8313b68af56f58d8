//! CAN transport for OBD-II queries.
//!
//! `Transport` trait with `send`/`poll_receive`. Two impls:
//! - `SocketCanTransport`: Linux-only, wraps `socketcan::CanSocket`
//! - `MockTransport`: all platforms, scripted responses
//!
//! Both refuse non read-only OBD modes before any bytes hit the bus.

pub mod error;
pub mod interface;
pub mod mock;
pub mod safety;

pub use error::{TransportError, TransportResult};
pub use interface::Transport;
pub use mock::MockTransport;

#[cfg(target_os = "linux")]
pub use interface::SocketCanTransport;
