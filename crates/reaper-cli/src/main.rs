use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Instrument, error, info, info_span};

use reaper_core::app::ReaperBuilder;
use reaper_core::config::{PoolConnection, parse_duration};
use reaper_core::domain::{ResourceState, ResourceType};
use reaper_core::impls::HttpPoolClient;
use reaper_core::observability::{COMPONENT, LogFormat, init_tracing};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "reaper",
    about = "Resets pool resources stuck in busy, cleaning or leased states"
)]
struct Cli {
    /// Pool service URL
    #[arg(long, env = "REAPER_BOSKOS_URL", default_value = "http://boskos")]
    boskos_url: String,

    /// Username used to access the pool service
    #[arg(long, env = "REAPER_USERNAME", default_value = "")]
    username: String,

    /// Path to the password file used to access the pool service
    #[arg(long, env = "REAPER_PASSWORD_FILE")]
    password_file: Option<PathBuf>,

    /// Comma separated list of resource types to reset (repeatable)
    #[arg(long = "resource-type", env = "REAPER_RESOURCE_TYPE")]
    resource_types: Vec<String>,

    /// Expiry after which busy resources are reset (e.g. 30m, 1h30m)
    #[arg(long, env = "REAPER_EXPIRE", default_value = "30m", value_parser = duration_arg)]
    expire: Duration,

    /// State to move resources to when reaped
    #[arg(long, env = "REAPER_TARGET_STATE", default_value = "dirty", value_parser = state_arg)]
    target_state: ResourceState,

    /// Sweep cadence
    #[arg(long, env = "REAPER_INTERVAL", default_value = "1m", value_parser = duration_arg)]
    interval: Duration,

    /// Log output format
    #[arg(value_enum, long, env = "REAPER_LOG_FORMAT", default_value_t = LogFormatArg::Json)]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    /// One JSON object per line
    Json,
    /// Human readable lines
    Text,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        }
    }
}

fn duration_arg(value: &str) -> Result<Duration, String> {
    parse_duration(value).map_err(|e| e.to_string())
}

fn state_arg(value: &str) -> Result<ResourceState, String> {
    value.parse::<ResourceState>().map_err(|e| e.to_string())
}

impl Cli {
    fn resource_types(&self) -> Vec<ResourceType> {
        self.resource_types
            .iter()
            .flat_map(|value| ResourceType::parse_list(value))
            .collect()
    }

    fn connection(&self) -> PoolConnection {
        PoolConnection {
            url: self.boskos_url.clone(),
            username: Some(self.username.clone()).filter(|u| !u.trim().is_empty()),
            password_file: self.password_file.clone(),
        }
    }
}

// ── entry point ────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format.into());

    let span = info_span!("reaper", component = COMPONENT);
    match run(cli).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            error!(component = COMPONENT, error = %message, "reaper failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = HttpPoolClient::new(&cli.connection())
        .context("unable to create a pool service client")?;
    info!(url = client.base_url(), "Initialized pool service client");

    let reaper = ReaperBuilder::new()
        .resource_types(cli.resource_types())
        .expiry(cli.expire)
        .target_state(cli.target_state)
        .interval(cli.interval)
        .build(client)
        .context("invalid reaper configuration")?;

    let sweeps = reaper.run_until(shutdown_signal()).await;
    info!(sweeps, "reaper exiting");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
