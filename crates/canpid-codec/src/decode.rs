//! Response decoder: Mode 01 formula table and decoded values.

use serde::{Deserialize, Serialize};

use crate::bitmap::{PidSupport, bitmap_entries};
use crate::error::{DecodeError, DecodeResult};
use crate::types::{DATA_OFFSET, ParameterId, ResponseFrame};

/// A response payload converted to physical units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Rpm(u16),
    SpeedKmh(u8),
    /// Integer percentage, 0–100.
    PercentageRounded(u16),
    TemperatureCelsius(i16),
    PressureKpa(u16),
    SupportedPidBitmap(Vec<PidSupport>),
}

impl DecodedValue {
    /// Unit of measurement, empty for the bitmap.
    pub fn unit(&self) -> &'static str {
        match self {
            DecodedValue::Rpm(_) => "rpm",
            DecodedValue::SpeedKmh(_) => "km/h",
            DecodedValue::PercentageRounded(_) => "%",
            DecodedValue::TemperatureCelsius(_) => "°C",
            DecodedValue::PressureKpa(_) => "kPa",
            DecodedValue::SupportedPidBitmap(_) => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Formula table
// ---------------------------------------------------------------------------

/// How to decode one PID: number of data bytes (A, B, ...) and the transform
/// applied to exactly those bytes.
struct Formula {
    pid: u8,
    data_bytes: usize,
    transform: fn(&[u8]) -> DecodedValue,
}

const FORMULAS: &[Formula] = &[
    Formula {
        pid: 0x00,
        data_bytes: 4,
        transform: support_bitmap,
    },
    Formula {
        pid: 0x04,
        data_bytes: 1,
        transform: percentage,
    },
    Formula {
        pid: 0x05,
        data_bytes: 1,
        transform: temperature,
    },
    Formula {
        pid: 0x0A,
        data_bytes: 1,
        transform: fuel_pressure,
    },
    Formula {
        pid: 0x0C,
        data_bytes: 2,
        transform: rpm,
    },
    Formula {
        pid: 0x0D,
        data_bytes: 1,
        transform: speed,
    },
    Formula {
        pid: 0x11,
        data_bytes: 1,
        transform: percentage,
    },
    Formula {
        pid: 0x20,
        data_bytes: 4,
        transform: support_bitmap,
    },
    Formula {
        pid: 0x2F,
        data_bytes: 1,
        transform: percentage,
    },
];

fn formula_for(pid: ParameterId) -> Option<&'static Formula> {
    let code = pid.code();
    FORMULAS.iter().find(|f| f.pid == code)
}

// ((A*256)+B)/4
fn rpm(d: &[u8]) -> DecodedValue {
    DecodedValue::Rpm((((d[0] as u16) << 8) | d[1] as u16) / 4)
}

fn speed(d: &[u8]) -> DecodedValue {
    DecodedValue::SpeedKmh(d[0])
}

// A*100/255, truncating
fn percentage(d: &[u8]) -> DecodedValue {
    DecodedValue::PercentageRounded(d[0] as u16 * 100 / 255)
}

fn temperature(d: &[u8]) -> DecodedValue {
    DecodedValue::TemperatureCelsius(d[0] as i16 - 40)
}

fn fuel_pressure(d: &[u8]) -> DecodedValue {
    DecodedValue::PressureKpa(d[0] as u16 * 3)
}

fn support_bitmap(d: &[u8]) -> DecodedValue {
    DecodedValue::SupportedPidBitmap(bitmap_entries(d))
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decode a Mode 01 response for `pid`.
///
/// Data bytes are read from payload offset 3 onward. The frame's identifier
/// and echo bytes are not checked; matching a response to its request is up
/// to the caller.
pub fn decode(pid: ParameterId, frame: &ResponseFrame) -> DecodeResult<DecodedValue> {
    let formula = formula_for(pid).ok_or(DecodeError::UnsupportedPid { pid: pid.code() })?;

    let data = frame.data();
    let required = DATA_OFFSET + formula.data_bytes;
    if data.len() < required {
        return Err(DecodeError::TruncatedFrame {
            pid: pid.code(),
            required: required as u8,
            actual: data.len() as u8,
        });
    }

    Ok((formula.transform)(&data[DATA_OFFSET..required]))
}

/// True if `decode` has a formula for `pid`.
pub fn is_decodable(pid: ParameterId) -> bool {
    formula_for(pid).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode01(pid: u8, data: &[u8]) -> ResponseFrame {
        let mut bytes = vec![data.len() as u8 + 2, 0x41, pid];
        bytes.extend_from_slice(data);
        ResponseFrame::new(0x7E8, &bytes)
    }

    #[test]
    fn decode_rpm() {
        let frame = mode01(0x0C, &[0x1A, 0xF8]);
        assert_eq!(
            decode(ParameterId::EngineRpm, &frame),
            Ok(DecodedValue::Rpm(1726))
        );
    }

    #[test]
    fn decode_rpm_truncates_quarter_steps() {
        // 0x1A2B = 6699, 6699 / 4 = 1674.75
        let frame = mode01(0x0C, &[0x1A, 0x2B]);
        assert_eq!(
            decode(ParameterId::EngineRpm, &frame),
            Ok(DecodedValue::Rpm(1674))
        );
    }

    #[test]
    fn decode_rpm_max() {
        let frame = mode01(0x0C, &[0xFF, 0xFF]);
        assert_eq!(
            decode(ParameterId::EngineRpm, &frame),
            Ok(DecodedValue::Rpm(16383))
        );
    }

    #[test]
    fn decode_speed() {
        let frame = mode01(0x0D, &[0x50]);
        assert_eq!(
            decode(ParameterId::VehicleSpeed, &frame),
            Ok(DecodedValue::SpeedKmh(80))
        );
    }

    #[test]
    fn decode_throttle_bounds() {
        for (raw, pct) in [(0xFF, 100), (0x00, 0), (0x80, 50)] {
            let frame = mode01(0x11, &[raw]);
            assert_eq!(
                decode(ParameterId::ThrottlePosition, &frame),
                Ok(DecodedValue::PercentageRounded(pct))
            );
        }
    }

    #[test]
    fn decode_fuel_level() {
        let frame = mode01(0x2F, &[0x80]);
        assert_eq!(
            decode(ParameterId::FuelTankLevelInput, &frame),
            Ok(DecodedValue::PercentageRounded(50))
        );
    }

    #[test]
    fn decode_engine_load() {
        let frame = mode01(0x04, &[127]);
        assert_eq!(
            decode(ParameterId::CalculatedEngineLoad, &frame),
            Ok(DecodedValue::PercentageRounded(49))
        );
    }

    #[test]
    fn decode_coolant_temp() {
        let frame = mode01(0x05, &[130]);
        assert_eq!(
            decode(ParameterId::EngineCoolantTemperature, &frame),
            Ok(DecodedValue::TemperatureCelsius(90))
        );

        let frame = mode01(0x05, &[0]);
        assert_eq!(
            decode(ParameterId::EngineCoolantTemperature, &frame),
            Ok(DecodedValue::TemperatureCelsius(-40))
        );
    }

    #[test]
    fn decode_fuel_pressure() {
        let frame = mode01(0x0A, &[0xFF]);
        assert_eq!(
            decode(ParameterId::FuelPressure, &frame),
            Ok(DecodedValue::PressureKpa(765))
        );
    }

    #[test]
    fn decode_support_bitmap_uses_data_bytes() {
        let frame = mode01(0x00, &[0xBE, 0x1F, 0xA8, 0x13]);
        let Ok(DecodedValue::SupportedPidBitmap(entries)) =
            decode(ParameterId::PidsSupported01To20, &frame)
        else {
            panic!("expected bitmap");
        };
        assert_eq!(entries.len(), 32);
        let supported: Vec<u16> = entries
            .iter()
            .filter(|e| e.supported)
            .map(|e| e.pid(0x00))
            .collect();
        assert_eq!(
            supported,
            vec![
                0x01, 0x03, 0x04, 0x05, 0x06, 0x07, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, 0x11, 0x13,
                0x15, 0x1C, 0x1F, 0x20,
            ]
        );
    }

    #[test]
    fn truncated_rpm() {
        let frame = ResponseFrame::new(0x7E8, &[0x04, 0x41, 0x0C, 0x1A]);
        assert_eq!(
            decode(ParameterId::EngineRpm, &frame),
            Err(DecodeError::TruncatedFrame {
                pid: 0x0C,
                required: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn truncated_empty_frame() {
        let frame = ResponseFrame::new(0x7E8, &[]);
        assert!(matches!(
            decode(ParameterId::VehicleSpeed, &frame),
            Err(DecodeError::TruncatedFrame { actual: 0, .. })
        ));
    }

    #[test]
    fn bytes_past_length_are_ignored() {
        let frame = ResponseFrame {
            identifier: 0x7E8,
            length: 4,
            payload: [0x04, 0x41, 0x0C, 0x1A, 0xF8, 0, 0, 0],
        };
        assert!(matches!(
            decode(ParameterId::EngineRpm, &frame),
            Err(DecodeError::TruncatedFrame { .. })
        ));
    }

    #[test]
    fn unsupported_pid() {
        let frame = mode01(0x42, &[0x30, 0x39]);
        assert_eq!(
            decode(ParameterId::Unknown(0x42), &frame),
            Err(DecodeError::UnsupportedPid { pid: 0x42 })
        );
        assert_eq!(
            decode(ParameterId::FuelSystemStatus, &frame),
            Err(DecodeError::UnsupportedPid { pid: 0x03 })
        );
    }

    #[test]
    fn unsupported_wins_over_truncated() {
        let frame = ResponseFrame::new(0x7E8, &[]);
        assert_eq!(
            decode(ParameterId::Unknown(0xFF), &frame),
            Err(DecodeError::UnsupportedPid { pid: 0xFF })
        );
    }

    #[test]
    fn decode_is_idempotent() {
        let frame = mode01(0x0C, &[0x36, 0xB0]);
        let first = decode(ParameterId::EngineRpm, &frame);
        let second = decode(ParameterId::EngineRpm, &frame);
        assert_eq!(first, second);
        assert_eq!(first, Ok(DecodedValue::Rpm(3500)));
    }

    #[test]
    fn decodable_pids() {
        assert!(is_decodable(ParameterId::EngineRpm));
        assert!(is_decodable(ParameterId::PidsSupported21To40));
        assert!(!is_decodable(ParameterId::FuelSystemStatus));
        assert!(!is_decodable(ParameterId::Unknown(0x51)));
    }

    #[test]
    fn decoded_value_serializes_tagged() {
        let json = serde_json::to_value(DecodedValue::Rpm(1726)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "rpm", "value": 1726 }));
        assert_eq!(DecodedValue::SpeedKmh(80).unit(), "km/h");
    }
}
