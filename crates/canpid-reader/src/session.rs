//! Runs a command against a reader and collects output lines.
//!
//! A failed PID becomes a "no data" line; the rest of the command still runs.

use canpid_codec::ParameterId;

use crate::command::{Command, LIVE_PIDS};
use crate::config::OutputFormat;
use crate::display;
use crate::reader::ObdReader;

/// Execute `command` and return the rendered output lines.
pub async fn execute(
    reader: &ObdReader<'_>,
    command: Command,
    format: OutputFormat,
) -> Vec<String> {
    let mut lines = Vec::new();

    match command {
        Command::Supported => supported(reader, format, &mut lines).await,
        Command::Read(pid) => live(reader, &[pid], format, &mut lines).await,
        Command::All => {
            supported(reader, format, &mut lines).await;
            live(reader, &LIVE_PIDS, format, &mut lines).await;
        }
    }

    lines
}

async fn supported(reader: &ObdReader<'_>, format: OutputFormat, lines: &mut Vec<String>) {
    let supported = match reader.supported_pids().await {
        Ok(supported) => supported,
        Err(e) => {
            tracing::warn!(error = %e, "supported PID query failed");
            let pid = ParameterId::PidsSupported01To20;
            lines.push(display::render_failure(pid, &e, format));
            return;
        }
    };

    lines.push(display::render(&supported.first, format));
    match supported.next {
        Some(Ok(reading)) => lines.push(display::render(&reading, format)),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "PIDs 21-40 query failed");
            let pid = ParameterId::PidsSupported21To40;
            lines.push(display::render_failure(pid, &e, format));
        }
        None => {}
    }
}

async fn live(
    reader: &ObdReader<'_>,
    pids: &[ParameterId],
    format: OutputFormat,
    lines: &mut Vec<String>,
) {
    for &pid in pids {
        match reader.read(pid).await {
            Ok(reading) => {
                tracing::debug!(pid = reading.pid, name = reading.name, "reading decoded");
                lines.push(display::render(&reading, format));
            }
            Err(e) => {
                tracing::warn!(pid = pid.code(), error = %e, "PID query failed");
                lines.push(display::render_failure(pid, &e, format));
            }
        }
    }
}
