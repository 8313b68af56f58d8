//! Supported-PID bitmap decoding.
//!
//! The most significant bit of each byte is the lowest PID in that byte's
//! group: bit 7 of byte 0 is offset 0, bit 0 of byte 0 is offset 7, bit 7 of
//! byte 1 is offset 8, and so on.

use serde::{Deserialize, Serialize};

use crate::types::ResponseFrame;

/// Support flag for one PID, relative to the queried base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PidSupport {
    /// Bit offset from the start of the bitmap (0 = base + 1).
    pub pid_offset: u8,
    pub supported: bool,
}

impl PidSupport {
    /// Absolute PID number for a bitmap queried at `base` (0x00, 0x20, ...).
    pub fn pid(&self, base: u8) -> u16 {
        base as u16 + self.pid_offset as u16 + 1
    }
}

/// Expand bitmap bytes into one entry per bit, ascending by offset.
pub(crate) fn bitmap_entries(bytes: &[u8]) -> Vec<PidSupport> {
    bytes
        .iter()
        .enumerate()
        .flat_map(|(i, &byte)| {
            (0..8u8).map(move |bit| PidSupport {
                pid_offset: (i as u8) * 8 + bit,
                supported: byte & (1 << (7 - bit)) != 0,
            })
        })
        .collect()
}

/// Decode every valid payload byte of `frame` as a supported-PID bitmap.
///
/// Yields `frame.length * 8` entries; an empty frame yields none.
pub fn decode_supported_pids(frame: &ResponseFrame) -> Vec<PidSupport> {
    bitmap_entries(frame.data())
}
