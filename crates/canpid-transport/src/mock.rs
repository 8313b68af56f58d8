//! Mock CAN transport for testing.
//!
//! Supports scripted response queues and frame recording. All tests use this
//! instead of real CAN hardware so the suite runs in CI on any platform.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use canpid_codec::{QueryFrame, ResponseFrame};

use crate::error::{TransportError, TransportResult};
use crate::interface::Transport;
use crate::safety;

/// Mock CAN transport with scripted responses and frame recording.
pub struct MockTransport {
    /// Queued frames returned by `poll_receive` (FIFO order).
    responses: Mutex<VecDeque<ResponseFrame>>,
    /// All frames passed to `send` (for test assertions).
    sent_frames: Mutex<Vec<QueryFrame>>,
    /// Whether to enforce OBD-II safety checks (default: true).
    enforce_safety: bool,
}

impl MockTransport {
    /// Create a new mock with no queued responses.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock pre-loaded with response frames.
    pub fn with_responses(responses: Vec<ResponseFrame>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            sent_frames: Mutex::new(Vec::new()),
            enforce_safety: true,
        }
    }

    /// Disable the read-only mode guard.
    pub fn without_safety(mut self) -> Self {
        self.enforce_safety = false;
        self
    }

    /// Queue an additional response frame.
    pub fn queue_response(&self, frame: ResponseFrame) {
        self.responses.lock().unwrap().push_back(frame);
    }

    /// Number of frames still waiting to be received.
    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Get copies of all frames that were sent.
    pub fn sent_frames(&self) -> Vec<QueryFrame> {
        self.sent_frames.lock().unwrap().clone()
    }

    /// Get the last sent frame, if any.
    pub fn last_sent(&self) -> Option<QueryFrame> {
        self.sent_frames.lock().unwrap().last().copied()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, frame: &QueryFrame) -> TransportResult<()> {
        if self.enforce_safety
            && let Some(mode) = safety::blocked_mode(frame)
        {
            return Err(TransportError::SafetyViolation { mode });
        }

        self.sent_frames.lock().unwrap().push(*frame);
        Ok(())
    }

    async fn poll_receive(&self) -> TransportResult<Option<ResponseFrame>> {
        Ok(self.responses.lock().unwrap().pop_front())
    }
}
