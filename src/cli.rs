use std::env;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    app::export::export_issues, config::load_config, infra::forge_client::ReqwestForgeClient,
    ports::ClockPort,
};

pub const LOG_FILTER_ENV: &str = "GH_ISSUES_CSV_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "gh-issues-csv",
    version,
    about = "Export a GitHub repository's issues and pull requests to CSV"
)]
struct Cli {
    /// Repository in owner/name form
    repo: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let cfg = load_config()?;
    let client = ReqwestForgeClient::new(&cfg.user_agent, cfg.request_timeout())
        .context("failed to build HTTP client")?;
    let cwd = env::current_dir().context("failed to resolve working directory")?;

    let outcome = export_issues(&client, &SystemClock, &cfg.api_base_url, &cli.repo, &cwd)
        .await
        .with_context(|| format!("failed to export issues for {}", cli.repo))?;

    let filename = outcome
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| outcome.path.display().to_string());
    println!("Written to {filename}");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
