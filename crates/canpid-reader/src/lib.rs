//! OBD-II PID reader: library crate behind the `canpid-reader` binary.
//!
//! Drives the codec over a `Transport`: send a Mode 01 query, poll for the
//! reply, decode it, and render the result as text or JSON.

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod reader;
pub mod session;

pub use command::Command;
pub use config::{OutputFormat, ReaderConfig};
pub use error::{ReadError, ReadResult};
pub use reader::{ObdReader, QueryOptions, Reading, SupportedPids};
