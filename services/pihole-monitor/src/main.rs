//! Pi-hole monitor CLI

use std::path::PathBuf;

use clap::Parser;
use pihole_monitor::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pihole-monitor")]
#[command(about = "Pi-hole status monitor with timed blocking control")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pi-hole hostname (overrides config file)
    #[arg(long)]
    hostname: Option<String>,

    /// Dashboard port (overrides config file)
    #[arg(long)]
    dashboard_port: Option<u16>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, hostname={:?}, dashboard_port={:?}, log_level={:?}",
        args.config,
        args.hostname,
        args.dashboard_port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if let Some(hostname) = args.hostname {
        config.pihole.hostname = hostname;
    }
    if let Some(dashboard_port) = args.dashboard_port {
        config.dashboard.port = dashboard_port;
    }
    config.validate()?;

    tracing::info!("Starting Pi-hole monitor");
    pihole_monitor::run(config).await?;

    Ok(())
}
