//! canpid-reader: query live OBD-II PIDs over SocketCAN.
//!
//! Usage: `canpid-reader [COMMAND] [CONFIG_PATH]`

use tracing_subscriber::EnvFilter;

use canpid_reader::config::ReaderConfig;
use canpid_reader::reader::ObdReader;
use canpid_reader::{Command, session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let command: Command = args.next().as_deref().unwrap_or("all").parse()?;

    // ── Load config ─────────────────────────────────────────────
    let config = match args.next() {
        Some(path) => ReaderConfig::from_file(&path)?,
        None => ReaderConfig::default(),
    };

    init_tracing(config.log_json);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interface = %config.can_interface,
        request_id = %format!("0x{:03X}", config.request_id),
        ?command,
        "canpid-reader starting"
    );

    // ── CAN transport ───────────────────────────────────────────
    let transport = open_transport(&config)?;
    let reader = ObdReader::new(&transport, config.query_options());

    for line in session::execute(&reader, command, config.output).await {
        println!("{line}");
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries readings.
fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(target_os = "linux")]
fn open_transport(
    config: &ReaderConfig,
) -> anyhow::Result<canpid_transport::SocketCanTransport> {
    Ok(canpid_transport::SocketCanTransport::open(
        &config.can_interface,
    )?)
}

#[cfg(not(target_os = "linux"))]
fn open_transport(config: &ReaderConfig) -> anyhow::Result<canpid_transport::MockTransport> {
    anyhow::bail!(
        "SocketCAN is only available on Linux (requested interface {})",
        config.can_interface
    )
}
