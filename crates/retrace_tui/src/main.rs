//! RETRACE TUI
//!
//! Plays a scripted host session into an interactive log monitor panel.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use retrace_log::HistoryMode;
use retrace_monitor::{MemoryStore, MonitorConfig, MonitorSession, Script};
use retrace_tui::MonitorApp;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrace-tui")]
#[command(about = "RETRACE log monitor panel", long_about = None)]
struct Args {
    /// Path to script file
    #[arg(short, long)]
    script: PathBuf,
    /// Path to monitor config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Enable rollback, sweep, reset and toggle
    #[arg(long)]
    time_travel: bool,
    /// Write logs to this file; the terminal is busy drawing
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)
            .wrap_err_with(|| format!("creating log file {}", path.display()))?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retrace=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))?
        }
        None => MonitorConfig::default(),
    };
    if args.time_travel {
        config = config.with_history_mode(HistoryMode::TimeTravel);
    }

    let raw = std::fs::read_to_string(&args.script)
        .wrap_err_with(|| format!("reading script {}", args.script.display()))?;
    let script = Script::from_json(&raw)?;

    let store = MemoryStore::new();
    let handle = MonitorSession::spawn(config);
    handle.attach(&store).await.detach();

    let player = handle.clone();
    let playing = tokio::spawn(async move {
        if let Err(err) = script.play(&store, &player).await {
            tracing::warn!(error = %err, "script stopped");
        }
    });

    let mut app = MonitorApp::new(handle);
    app.run().await?;
    playing.abort();

    Ok(())
}
