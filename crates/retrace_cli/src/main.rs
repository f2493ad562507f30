//! RETRACE CLI
//!
//! Replays a scripted host session through a monitor and prints the
//! resulting action log.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod render;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use render::Report;
use retrace_core::ObservedValue;
use retrace_log::HistoryMode;
use retrace_monitor::{MemoryStore, MonitorConfig, MonitorSession, Script};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrace")]
#[command(about = "RETRACE - state transaction log monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a script and print the recorded log
    Record {
        /// Path to script file
        #[arg(short, long)]
        script: PathBuf,
        /// Path to monitor config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated keys to diff instead of modified nodes
        #[arg(long, value_delimiter = ',')]
        values: Vec<String>,
        /// Enable rollback, sweep, reset and toggle
        #[arg(long)]
        time_travel: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Parse a script without playing it
    Check {
        /// Path to script file
        #[arg(short, long)]
        script: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retrace=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Record {
            script,
            config,
            values,
            time_travel,
            format,
        } => {
            let config = load_config(config.as_deref(), &values, time_travel)?;
            let script = load_script(&script)?;
            println!("{}", record(config, &script, format).await?);
            Ok(())
        }
        Commands::Check { script } => {
            let parsed = load_script(&script)?;
            println!(
                "{}: {} steps, {} transactions",
                script.display(),
                parsed.steps.len(),
                parsed.transaction_count()
            );
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, values: &[String], time_travel: bool) -> Result<MonitorConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))?
        }
        None => MonitorConfig::default(),
    };
    if !values.is_empty() {
        config = config.with_values(ObservedValue::many(values)?);
    }
    if time_travel {
        config = config.with_history_mode(HistoryMode::TimeTravel);
    }
    Ok(config)
}

fn load_script(path: &Path) -> Result<Script> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading script {}", path.display()))?;
    Script::from_json(&raw).wrap_err_with(|| format!("parsing script {}", path.display()))
}

async fn record(config: MonitorConfig, script: &Script, format: Format) -> Result<String> {
    let store = MemoryStore::new();
    let handle = MonitorSession::spawn(config);
    handle.attach(&store).await.detach();

    let outcomes = script.play(&store, &handle).await?;
    let view = handle.view();
    tracing::info!(
        session = %handle.session_id(),
        recorded = view.actions_by_id.len(),
        active = view.len(),
        "script finished"
    );

    let report = Report {
        session: handle.session_id().to_string(),
        view: &view,
        outcomes: &outcomes,
    };
    Ok(match format {
        Format::Text => report.to_text(handle.config()),
        Format::Json => report.to_json()?,
    })
}
