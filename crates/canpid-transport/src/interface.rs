//! CAN bus transport abstraction.
//!
//! Safety enforcement happens at the transport level: `send` rejects
//! disallowed OBD-II modes before any bytes hit the bus.

use async_trait::async_trait;

use canpid_codec::{QueryFrame, ResponseFrame};

use crate::error::TransportResult;

/// Trait for CAN bus transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Put a query frame on the bus. No retry.
    async fn send(&self, frame: &QueryFrame) -> TransportResult<()>;

    /// Non-blocking check for a received frame.
    ///
    /// Returns `Ok(None)` when nothing has arrived. Frames are returned in
    /// arrival order with no identifier filtering.
    async fn poll_receive(&self) -> TransportResult<Option<ResponseFrame>>;
}

// ── SocketCAN (Linux-only) ──────────────────────────────────────

#[cfg(target_os = "linux")]
pub use socket_can::SocketCanTransport;

#[cfg(target_os = "linux")]
mod socket_can {
    use std::io::ErrorKind;

    use async_trait::async_trait;
    use socketcan::{CanFrame, CanSocket, EmbeddedFrame, Frame, Socket, StandardId};

    use canpid_codec::{QueryFrame, ResponseFrame};

    use super::Transport;
    use crate::error::{TransportError, TransportResult};
    use crate::safety;

    /// SocketCAN transport for Linux hosts.
    ///
    /// The bitrate is configured on the OS interface (`ip link set can0 type
    /// can bitrate 500000`), not here.
    pub struct SocketCanTransport {
        interface: String,
        socket: CanSocket,
    }

    impl SocketCanTransport {
        /// Open `interface` (e.g. "can0") in non-blocking mode.
        pub fn open(interface: &str) -> TransportResult<Self> {
            let socket = CanSocket::open(interface).map_err(|e| TransportError::Open {
                interface: interface.to_string(),
                reason: e.to_string(),
            })?;
            socket
                .set_nonblocking(true)
                .map_err(|e| TransportError::Open {
                    interface: interface.to_string(),
                    reason: e.to_string(),
                })?;

            tracing::info!(interface, "CAN interface opened");
            Ok(Self {
                interface: interface.to_string(),
                socket,
            })
        }

        pub fn interface(&self) -> &str {
            &self.interface
        }
    }

    #[async_trait]
    impl Transport for SocketCanTransport {
        async fn send(&self, frame: &QueryFrame) -> TransportResult<()> {
            if let Some(mode) = safety::blocked_mode(frame) {
                return Err(TransportError::SafetyViolation { mode });
            }

            let raw = to_can_frame(frame)?;
            self.socket.write_frame(&raw)?;
            tracing::debug!(
                interface = %self.interface,
                id = %format!("0x{:03X}", frame.identifier()),
                data = ?frame.payload(),
                "frame sent"
            );
            Ok(())
        }

        async fn poll_receive(&self) -> TransportResult<Option<ResponseFrame>> {
            match self.socket.read_frame() {
                Ok(CanFrame::Error(err)) => Err(TransportError::Interface(format!(
                    "bus error frame: {err:?}"
                ))),
                Ok(raw) => {
                    let frame = from_can_frame(&raw);
                    tracing::debug!(
                        interface = %self.interface,
                        id = %format!("0x{:03X}", frame.identifier),
                        data = ?frame.data(),
                        "frame received"
                    );
                    Ok(Some(frame))
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
                Err(e) => Err(e.into()),
            }
        }
    }

    /// Convert a query into a standard-ID SocketCAN data frame.
    pub(crate) fn to_can_frame(frame: &QueryFrame) -> TransportResult<CanFrame> {
        let id = u16::try_from(frame.identifier())
            .ok()
            .and_then(StandardId::new)
            .ok_or_else(|| {
                TransportError::InvalidFrame(format!(
                    "0x{:X} is not an 11-bit identifier",
                    frame.identifier()
                ))
            })?;

        <CanFrame as EmbeddedFrame>::new(id, frame.payload())
            .ok_or_else(|| TransportError::InvalidFrame("payload longer than 8 bytes".into()))
    }

    /// Copy a received SocketCAN frame into a codec response.
    pub(crate) fn from_can_frame(raw: &CanFrame) -> ResponseFrame {
        ResponseFrame::new(Frame::raw_id(raw), EmbeddedFrame::data(raw))
    }

}
