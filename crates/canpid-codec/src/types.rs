//! OBD-II constants, diagnostic modes, parameter IDs and CAN frame values.

use serde::{Deserialize, Serialize};

// ── OBD-II CAN IDs ──────────────────────────────────────────────

/// Standard OBD-II functional broadcast request CAN ID.
pub const OBD_REQUEST_ID: u32 = 0x7DF;

/// First OBD-II response CAN ID (ECU #1).
pub const OBD_RESPONSE_ID_MIN: u32 = 0x7E8;

/// Last OBD-II response CAN ID (ECU #8).
pub const OBD_RESPONSE_ID_MAX: u32 = 0x7EF;

/// Check if a CAN ID is an OBD-II ECU response (0x7E8–0x7EF).
pub fn is_obd_response(id: u32) -> bool {
    (OBD_RESPONSE_ID_MIN..=OBD_RESPONSE_ID_MAX).contains(&id)
}

// ── Frame layout ────────────────────────────────────────────────

/// Classic CAN payload size.
pub const FRAME_LEN: usize = 8;

/// Additional-data-byte count of a query: mode + PID.
pub const QUERY_DATA_LEN: u8 = 0x02;

/// Payload offset of the first data byte (A) in a response,
/// after the length, mode echo and PID echo bytes.
pub const DATA_OFFSET: usize = 3;

// ── Diagnostic modes ────────────────────────────────────────────

/// OBD-II diagnostic service selector (SAE J1979 modes 0x01–0x0A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DiagnosticMode {
    /// Show current data.
    CurrentData = 0x01,
    /// Show freeze frame data.
    FreezeFrame = 0x02,
    /// Show stored diagnostic trouble codes.
    StoredDtcs = 0x03,
    /// Clear diagnostic trouble codes and stored values.
    ClearDtcs = 0x04,
    /// Oxygen sensor monitoring test results (non-CAN only).
    OxygenSensorTests = 0x05,
    /// On-board monitoring test results.
    OnBoardMonitoring = 0x06,
    /// Show pending diagnostic trouble codes.
    PendingDtcs = 0x07,
    /// Control operation of on-board component/system.
    ControlOnBoard = 0x08,
    /// Request vehicle information.
    VehicleInfo = 0x09,
    /// Permanent diagnostic trouble codes.
    PermanentDtcs = 0x0A,
}

impl DiagnosticMode {
    /// Every mode, in numeric order.
    pub const ALL: [DiagnosticMode; 10] = [
        DiagnosticMode::CurrentData,
        DiagnosticMode::FreezeFrame,
        DiagnosticMode::StoredDtcs,
        DiagnosticMode::ClearDtcs,
        DiagnosticMode::OxygenSensorTests,
        DiagnosticMode::OnBoardMonitoring,
        DiagnosticMode::PendingDtcs,
        DiagnosticMode::ControlOnBoard,
        DiagnosticMode::VehicleInfo,
        DiagnosticMode::PermanentDtcs,
    ];

    /// Wire value of the mode.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

// ── Parameter IDs ───────────────────────────────────────────────

/// Mode 01 parameter ID.
///
/// Known PIDs get their own variant; any other code is carried as
/// `Unknown` so it can still be queried and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterId {
    PidsSupported01To20,
    FuelSystemStatus,
    CalculatedEngineLoad,
    EngineCoolantTemperature,
    FuelPressure,
    EngineRpm,
    VehicleSpeed,
    ThrottlePosition,
    PidsSupported21To40,
    FuelTankLevelInput,
    Unknown(u8),
}

impl ParameterId {
    /// Wire value of the PID.
    pub fn code(self) -> u8 {
        match self {
            ParameterId::PidsSupported01To20 => 0x00,
            ParameterId::FuelSystemStatus => 0x03,
            ParameterId::CalculatedEngineLoad => 0x04,
            ParameterId::EngineCoolantTemperature => 0x05,
            ParameterId::FuelPressure => 0x0A,
            ParameterId::EngineRpm => 0x0C,
            ParameterId::VehicleSpeed => 0x0D,
            ParameterId::ThrottlePosition => 0x11,
            ParameterId::PidsSupported21To40 => 0x20,
            ParameterId::FuelTankLevelInput => 0x2F,
            ParameterId::Unknown(code) => code,
        }
    }

    /// Human-readable parameter name.
    pub fn name(self) -> &'static str {
        match self {
            ParameterId::PidsSupported01To20 => "PIDs Supported 01-20",
            ParameterId::FuelSystemStatus => "Fuel System Status",
            ParameterId::CalculatedEngineLoad => "Engine Load",
            ParameterId::EngineCoolantTemperature => "Coolant Temperature",
            ParameterId::FuelPressure => "Fuel Pressure",
            ParameterId::EngineRpm => "Engine RPM",
            ParameterId::VehicleSpeed => "Vehicle Speed",
            ParameterId::ThrottlePosition => "Throttle Position",
            ParameterId::PidsSupported21To40 => "PIDs Supported 21-40",
            ParameterId::FuelTankLevelInput => "Fuel Level",
            ParameterId::Unknown(_) => "Unknown PID",
        }
    }

    /// True for the supported-PID bitmap queries (0x00, 0x20).
    pub fn is_support_bitmap(self) -> bool {
        matches!(
            self,
            ParameterId::PidsSupported01To20 | ParameterId::PidsSupported21To40
        )
    }
}

impl From<u8> for ParameterId {
    fn from(code: u8) -> Self {
        match code {
            0x00 => ParameterId::PidsSupported01To20,
            0x03 => ParameterId::FuelSystemStatus,
            0x04 => ParameterId::CalculatedEngineLoad,
            0x05 => ParameterId::EngineCoolantTemperature,
            0x0A => ParameterId::FuelPressure,
            0x0C => ParameterId::EngineRpm,
            0x0D => ParameterId::VehicleSpeed,
            0x11 => ParameterId::ThrottlePosition,
            0x20 => ParameterId::PidsSupported21To40,
            0x2F => ParameterId::FuelTankLevelInput,
            other => ParameterId::Unknown(other),
        }
    }
}

impl From<ParameterId> for u8 {
    fn from(pid: ParameterId) -> Self {
        pid.code()
    }
}

// ── CAN frames ──────────────────────────────────────────────────

/// An outgoing OBD-II query: standard 11-bit ID, always 8 data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryFrame {
    identifier: u32,
    extended: bool,
    length: u8,
    payload: [u8; FRAME_LEN],
}

impl QueryFrame {
    pub(crate) fn new(mode: DiagnosticMode, pid: ParameterId) -> Self {
        Self {
            identifier: OBD_REQUEST_ID,
            extended: false,
            length: FRAME_LEN as u8,
            payload: [
                QUERY_DATA_LEN,
                mode.as_byte(),
                pid.code(),
                0x00,
                0x00,
                0x00,
                0x00,
                0x00,
            ],
        }
    }

    /// Same query addressed to a different CAN ID, for buses that do not
    /// answer on the standard broadcast ID.
    pub fn with_identifier(self, identifier: u32) -> Self {
        Self { identifier, ..self }
    }

    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Always false: only 11-bit identifiers are produced.
    pub fn extended(&self) -> bool {
        self.extended
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn payload(&self) -> &[u8; FRAME_LEN] {
        &self.payload
    }

    /// Mode byte of the query.
    pub fn mode(&self) -> u8 {
        self.payload[1]
    }

    /// PID byte of the query.
    pub fn pid(&self) -> u8 {
        self.payload[2]
    }
}

/// A frame received from the bus. Only the first `length` payload bytes
/// are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseFrame {
    /// CAN arbitration ID of the sender.
    pub identifier: u32,
    /// Number of valid payload bytes (0–8).
    pub length: u8,
    /// Raw payload; bytes past `length` are undefined.
    pub payload: [u8; FRAME_LEN],
}

impl ResponseFrame {
    /// Build a frame from received bytes, keeping at most 8 of them.
    pub fn new(identifier: u32, data: &[u8]) -> Self {
        let len = data.len().min(FRAME_LEN);
        let mut payload = [0u8; FRAME_LEN];
        payload[..len].copy_from_slice(&data[..len]);
        Self {
            identifier,
            length: len as u8,
            payload,
        }
    }

    /// Valid payload bytes, with `length` clamped to the frame size.
    pub fn data(&self) -> &[u8] {
        let len = (self.length as usize).min(FRAME_LEN);
        &self.payload[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obd_response_id_range() {
        assert!(is_obd_response(0x7E8));
        assert!(is_obd_response(0x7EF));
        assert!(!is_obd_response(0x7E7));
        assert!(!is_obd_response(0x7F0));
        assert!(!is_obd_response(OBD_REQUEST_ID));
    }

    #[test]
    fn mode_bytes_are_sequential() {
        for (i, mode) in DiagnosticMode::ALL.iter().enumerate() {
            assert_eq!(mode.as_byte(), i as u8 + 1);
        }
    }

    #[test]
    fn pid_codes_round_trip_through_u8() {
        for code in 0..=u8::MAX {
            assert_eq!(ParameterId::from(code).code(), code);
        }
    }

    #[test]
    fn known_pids_map_to_named_variants() {
        assert_eq!(ParameterId::from(0x0C), ParameterId::EngineRpm);
        assert_eq!(ParameterId::from(0x2F), ParameterId::FuelTankLevelInput);
        assert_eq!(ParameterId::from(0x42), ParameterId::Unknown(0x42));
        assert_eq!(ParameterId::EngineRpm.name(), "Engine RPM");
    }

    #[test]
    fn response_frame_keeps_at_most_eight_bytes() {
        let frame = ResponseFrame::new(0x7E8, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(frame.length, 8);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn response_frame_data_clamps_bad_length() {
        let frame = ResponseFrame {
            identifier: 0x7E8,
            length: 200,
            payload: [0xAA; FRAME_LEN],
        };
        assert_eq!(frame.data().len(), FRAME_LEN);
    }

    #[test]
    fn short_response_frame_zero_pads() {
        let frame = ResponseFrame::new(0x7E8, &[0x03, 0x41, 0x0D]);
        assert_eq!(frame.length, 3);
        assert_eq!(frame.payload[3..], [0; 5]);
    }
}
