//! Human-readable and JSON rendering of readings.

use std::fmt::Display;

use canpid_codec::{DecodedValue, ParameterId};

use crate::config::OutputFormat;
use crate::error::ReadError;
use crate::reader::Reading;

/// Render a reading in the configured format.
pub fn render(reading: &Reading, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(reading),
        OutputFormat::Json => render_json(reading),
    }
}

/// `"Engine RPM: 1726 rpm"`, or a PID/status table for bitmaps.
pub fn render_text(reading: &Reading) -> String {
    match &reading.value {
        DecodedValue::SupportedPidBitmap(entries) => {
            let mut lines = vec![
                format!("{} (from 0x{:03X})", reading.name, reading.source_id),
                "PID\tStatus".to_string(),
            ];
            lines.extend(entries.iter().map(|e| {
                let status = if e.supported { "YES" } else { "NO" };
                format!("{:02X}\t{status}", e.pid(reading.pid))
            }));
            lines.join("\n")
        }
        DecodedValue::Rpm(v) => scalar(reading, v),
        DecodedValue::SpeedKmh(v) => scalar(reading, v),
        DecodedValue::PercentageRounded(v) => scalar(reading, v),
        DecodedValue::TemperatureCelsius(v) => scalar(reading, v),
        DecodedValue::PressureKpa(v) => scalar(reading, v),
    }
}

fn scalar(reading: &Reading, value: impl Display) -> String {
    format!("{}: {value} {}", reading.name, reading.unit)
}

/// One JSON object per reading.
pub fn render_json(reading: &Reading) -> String {
    serde_json::to_string(reading).unwrap_or_else(|e| {
        serde_json::json!({ "pid": reading.pid, "error": e.to_string() }).to_string()
    })
}

/// "No data" line for a PID whose query failed.
pub fn render_failure(pid: ParameterId, err: &ReadError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}: no data ({err})", pid.name()),
        OutputFormat::Json => serde_json::json!({
            "pid": pid.code(),
            "name": pid.name(),
            "error": err.to_string(),
        })
        .to_string(),
    }
}
