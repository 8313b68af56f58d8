//! Query round-trip: encode, send, poll for the reply, decode.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use canpid_codec::{
    DecodedValue, DiagnosticMode, OBD_REQUEST_ID, ParameterId, ResponseFrame, decode, encode,
    is_obd_response,
};
use canpid_transport::Transport;

use crate::error::{ReadError, ReadResult};

/// Offset of PID 0x20 in the 0x00 bitmap: set when the 0x20 bitmap exists.
const NEXT_BITMAP_OFFSET: u8 = 31;

/// Round-trip settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// CAN ID the query is sent to.
    pub request_id: u32,
    /// Give up if nothing arrives within this window.
    pub timeout: Duration,
    /// Sleep between receive polls.
    pub poll_interval: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            request_id: OBD_REQUEST_ID,
            timeout: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// A decoded PID value with metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// When the response was decoded.
    pub time: DateTime<Utc>,
    /// CAN ID of the responding ECU.
    pub source_id: u32,
    pub pid: u8,
    pub name: &'static str,
    pub value: DecodedValue,
    pub unit: &'static str,
    /// Valid bytes of the response frame.
    pub raw_bytes: Vec<u8>,
}

/// Reads Mode 01 PIDs through a transport.
pub struct ObdReader<'a> {
    transport: &'a dyn Transport,
    options: QueryOptions,
}

impl<'a> ObdReader<'a> {
    pub fn new(transport: &'a dyn Transport, options: QueryOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Send a Mode 01 query for `pid` and return the next frame that arrives.
    ///
    /// The reply is not matched against the request: whatever frame comes
    /// first is returned. Frames from outside the ECU response range are
    /// logged but still returned.
    pub async fn query(&self, pid: ParameterId) -> ReadResult<ResponseFrame> {
        let request =
            encode(DiagnosticMode::CurrentData, pid).with_identifier(self.options.request_id);
        self.transport.send(&request).await?;
        tracing::debug!(
            pid = %format!("0x{:02X}", pid.code()),
            request_id = %format!("0x{:03X}", request.identifier()),
            "query sent"
        );

        let timeout = self.options.timeout;
        let start = Instant::now();

        loop {
            if let Some(frame) = self.transport.poll_receive().await? {
                if !is_obd_response(frame.identifier) {
                    tracing::warn!(
                        pid = %format!("0x{:02X}", pid.code()),
                        source_id = %format!("0x{:03X}", frame.identifier),
                        "response from outside the OBD-II ECU range"
                    );
                }
                return Ok(frame);
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(ReadError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.options.poll_interval.min(timeout - elapsed)).await;
        }
    }

    /// Query `pid` and decode the reply.
    pub async fn read(&self, pid: ParameterId) -> ReadResult<Reading> {
        let frame = self.query(pid).await?;
        let value = decode(pid, &frame)?;

        Ok(Reading {
            time: Utc::now(),
            source_id: frame.identifier,
            pid: pid.code(),
            name: pid.name(),
            unit: value.unit(),
            value,
            raw_bytes: frame.data().to_vec(),
        })
    }

    /// Read the supported-PID bitmaps: always 01–20, and 21–40 when the
    /// first bitmap says it exists.
    ///
    /// Only a failed 01–20 read is an error; the 21–40 outcome is returned
    /// alongside the first bitmap.
    pub async fn supported_pids(&self) -> ReadResult<SupportedPids> {
        let first = self.read(ParameterId::PidsSupported01To20).await?;
        let next = if flags_next_bitmap(&first) {
            Some(self.read(ParameterId::PidsSupported21To40).await)
        } else {
            None
        };
        Ok(SupportedPids { first, next })
    }
}

/// Supported-PID bitmaps read from the ECU.
#[derive(Debug)]
pub struct SupportedPids {
    /// PIDs 01–20.
    pub first: Reading,
    /// PIDs 21–40, or `None` when `first` does not flag PID 0x20.
    pub next: Option<ReadResult<Reading>>,
}

fn flags_next_bitmap(reading: &Reading) -> bool {
    match &reading.value {
        DecodedValue::SupportedPidBitmap(entries) => entries
            .iter()
            .any(|e| e.pid_offset == NEXT_BITMAP_OFFSET && e.supported),
        _ => false,
    }
}
