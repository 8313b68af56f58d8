//! Request encoder.

use crate::types::{DiagnosticMode, ParameterId, QueryFrame};

/// Build the standard OBD-II query frame for a mode and PID.
///
/// The frame goes to the functional broadcast ID 0x7DF with payload
/// `[0x02, mode, pid, 0, 0, 0, 0, 0]`. Use [`QueryFrame::with_identifier`]
/// for buses that need a different request ID.
pub fn encode(mode: DiagnosticMode, pid: ParameterId) -> QueryFrame {
    QueryFrame::new(mode, pid)
}
