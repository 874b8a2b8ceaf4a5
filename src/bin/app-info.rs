use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use app_info::config::ConfigStore;
use app_info::health::{HealthReport, StatusCode, format_report};
use app_info::snapshot::{Snapshot, format_snapshot};
use app_info::AppInfo;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

/// Print an application health and build metadata snapshot
#[derive(Debug, Parser)]
#[command(name = "app-info", version)]
struct Cli {
    /// Config document to read instead of $CONFIG_FILE_PATH
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Renders the snapshot (and, for tables, the per-check report)
fn render(cli: &Cli, snapshot: &Snapshot, report: &HealthReport) -> Result<String> {
    let output = match cli.format {
        Format::Json if cli.pretty => serde_json::to_string_pretty(snapshot)?,
        Format::Json => serde_json::to_string(snapshot)?,
        Format::Table => format!("{}\n{}", format_snapshot(snapshot), format_report(report)),
    };
    Ok(output)
}

/// 0 = healthy, 1 = unhealthy, 2 = degraded
fn exit_status(status: StatusCode) -> u8 {
    status.exit_code() as u8
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout carries only the snapshot
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("app_info=info")),
        )
        .init();

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new(),
    };
    let info = AppInfo::new().with_config(store).with_default_checks();

    let (snapshot, report) = info.inspect();
    println!("{}", render(&cli, &snapshot, &report)?);

    Ok(ExitCode::from(exit_status(snapshot.status)))
}
