//! CAN bus safety guard: keeps OBD-II queries read-only.
//!
//! Allowed OBD-II modes:
//! - 0x01: Show current data
//! - 0x02: Show freeze frame data
//! - 0x09: Request vehicle information
//!
//! Mode 0x04 (clear DTCs) and 0x08 (control on-board systems) write to the
//! vehicle and are blocked, as are the DTC listing modes.

use canpid_codec::{DiagnosticMode, QueryFrame};

/// OBD-II modes allowed on the bus.
pub const ALLOWED_MODES: &[DiagnosticMode] = &[
    DiagnosticMode::CurrentData,
    DiagnosticMode::FreezeFrame,
    DiagnosticMode::VehicleInfo,
];

/// Validates that an OBD-II mode byte is allowed under the safety policy.
pub fn is_mode_allowed(mode: u8) -> bool {
    ALLOWED_MODES.iter().any(|m| m.as_byte() == mode)
}

/// Returns the offending mode if `frame` is a query the guard must block.
pub fn blocked_mode(frame: &QueryFrame) -> Option<u8> {
    let mode = frame.mode();
    (!is_mode_allowed(mode)).then_some(mode)
}
