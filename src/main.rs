use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use batlog::{status_line, SamplerSettings, SessionController, SettingsStore};

#[derive(Parser, Debug)]
#[command(
    name = "batlog",
    version,
    about = "Background battery and system telemetry logger"
)]
struct Args {
    /// Seconds between samples
    #[arg(long)]
    interval: Option<u64>,

    /// Directory where session logs are created
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Platform-provided file exposing cellular signal strength in dBm
    #[arg(long)]
    cell_signal_source: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => SettingsStore::new(path.clone())?.sampler(),
        None => SamplerSettings::default(),
    };
    if let Some(interval) = args.interval {
        settings.interval_secs = interval;
    }
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }
    if let Some(source) = args.cell_signal_source {
        settings.cell_signal_source = Some(source);
    }

    let interval = settings.interval_secs;
    let controller = SessionController::new(settings);
    controller.start(interval).await?;
    info!("{}", status_line(&controller.status().await));
    info!("press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    controller.stop().await?;
    info!("{}", status_line(&controller.status().await));
    Ok(())
}
