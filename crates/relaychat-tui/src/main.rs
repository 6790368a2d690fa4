//! relaychat entry point.

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use relaychat_app::{ConnectionConfig, DisplayName, Runtime};
use relaychat_client::transport::TransportConfig;
use relaychat_core::{DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_DELAY, DEFAULT_RELAY_URL};
use relaychat_tui::TerminalDriver;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal client for a relay chat server
#[derive(Parser, Debug)]
#[command(name = "relaychat")]
#[command(about = "Terminal client for a relay chat server")]
#[command(version)]
struct Args {
    /// Relay WebSocket URL
    #[arg(short, long, env = "RELAYCHAT_URL", default_value = DEFAULT_RELAY_URL)]
    url: String,

    /// Display name to announce on every connection
    #[arg(short, long)]
    name: Option<DisplayName>,

    /// Consecutive reconnects before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_RECONNECT_ATTEMPTS)]
    max_reconnect_attempts: u32,

    /// Wait between a lost connection and the next attempt, in milliseconds
    #[arg(long, default_value_t = DEFAULT_RECONNECT_DELAY.as_millis() as u64)]
    reconnect_delay_ms: u64,

    /// Handshake timeout, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    connect_timeout_ms: u64,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Install the log subscriber. Without a log file nothing is logged.
fn init_tracing(args: &Args) -> std::io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args)?;

    tracing::info!(url = %args.url, "relaychat starting");

    let config = ConnectionConfig {
        url: args.url,
        max_reconnect_attempts: args.max_reconnect_attempts,
        reconnect_delay: Duration::from_millis(args.reconnect_delay_ms),
    };
    let transport_config = TransportConfig {
        connect_timeout: Duration::from_millis(args.connect_timeout_ms),
        ..TransportConfig::default()
    };

    let driver = TerminalDriver::new(transport_config)?;
    let mut runtime = Runtime::new(driver, config, args.name);

    Ok(runtime.run().await?)
}
