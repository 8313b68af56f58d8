//! Shared test harness for E2E integration tests.
//!
//! Plays the ECU side of the bus: builds Mode 01 replies the way a vehicle
//! would and queues them on a `MockTransport`.

#![allow(dead_code)]

use std::time::Duration;

use canpid_codec::ResponseFrame;
use canpid_reader::{ObdReader, QueryOptions};
use canpid_transport::MockTransport;

/// ECU #1 response ID.
pub const ECU_ID: u32 = 0x7E8;

/// Single-frame Mode 01 reply: `[len, 0x41, pid, data..]`, zero padded to 8.
pub fn mode01_reply(pid: u8, data: &[u8]) -> ResponseFrame {
    let mut bytes = vec![data.len() as u8 + 2, 0x41, pid];
    bytes.extend_from_slice(data);
    bytes.resize(8, 0x00);
    ResponseFrame::new(ECU_ID, &bytes)
}

/// Mock bus plus reader settings with a short timeout.
pub struct TestHarness {
    pub bus: MockTransport,
    pub options: QueryOptions,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            bus: MockTransport::new(),
            options: QueryOptions {
                timeout: Duration::from_millis(50),
                ..QueryOptions::default()
            },
        }
    }

    /// Harness whose ECU answers with `replies`, in order.
    pub fn with_replies(replies: Vec<ResponseFrame>) -> Self {
        Self {
            bus: MockTransport::with_responses(replies),
            ..Self::new()
        }
    }

    pub fn reader(&self) -> ObdReader<'_> {
        ObdReader::new(&self.bus, self.options)
    }
}
