//! Reader configuration, loadable from TOML.

use std::time::Duration;

use serde::Deserialize;

use canpid_codec::OBD_REQUEST_ID;

use crate::reader::QueryOptions;

/// Largest 11-bit CAN identifier.
const MAX_STANDARD_ID: u32 = 0x7FF;

/// How readings are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level configuration for the reader.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// SocketCAN interface name.
    #[serde(default = "default_can_interface")]
    pub can_interface: String,
    /// CAN ID queries are sent to. Only change this for buses that do not
    /// answer the standard broadcast ID.
    #[serde(default = "default_request_id")]
    pub request_id: u32,
    /// How long to wait for a reply to each query.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_ms: u64,
    /// Delay between receive polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub output: OutputFormat,
    /// Emit logs as JSON instead of plain text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_can_interface() -> String {
    "can0".to_string()
}

fn default_request_id() -> u32 {
    OBD_REQUEST_ID
}

fn default_response_timeout() -> u64 {
    1000
}

fn default_poll_interval() -> u64 {
    10
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            can_interface: default_can_interface(),
            request_id: default_request_id(),
            response_timeout_ms: default_response_timeout(),
            poll_interval_ms: default_poll_interval(),
            output: OutputFormat::default(),
            log_json: false,
        }
    }
}

impl ReaderConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.request_id > MAX_STANDARD_ID {
            anyhow::bail!(
                "request_id 0x{:X} is not an 11-bit CAN identifier",
                self.request_id
            );
        }
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be greater than zero");
        }
        Ok(())
    }

    /// Round-trip settings for the reader.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            request_id: self.request_id,
            timeout: Duration::from_millis(self.response_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
