use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use qt_risk::ZeroPolicy;
use qt_service::{ReportService, ServiceConfig};

#[derive(Debug, Parser)]
#[command(
    name = "qt-report",
    version,
    about = "Quarterly financials and risk findings for public companies"
)]
struct Cli {
    /// Serve synthetic sample data instead of calling SEC EDGAR.
    #[arg(long, global = true)]
    offline: bool,
    /// Treat zero-valued amounts as missing, matching older dashboards.
    #[arg(long = "legacy-zero", global = true)]
    legacy_zero: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Financial periods and detected risks for one company.
    Company {
        /// Central Index Key, with or without leading zeros.
        cik: String,
        #[arg(long)]
        quarters: Option<usize>,
    },
    /// Find companies by ticker or name.
    Search { query: String },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ServiceConfig::from_env()?;
    if cli.offline {
        config.offline = true;
    }
    if cli.legacy_zero {
        config.risk.zero_policy = ZeroPolicy::ZeroAsMissing;
    }
    if let Command::Company {
        quarters: Some(quarters),
        ..
    } = &cli.command
    {
        config.quarters = *quarters;
    }

    let service = ReportService::from_config(&config)?;

    match cli.command {
        Command::Company { cik, .. } => print_json(&service.company_report(&cik).await?),
        Command::Search { query } => print_json(&service.search(&query).await?),
    }
}
