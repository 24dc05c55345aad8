//! carlog-report - maintenance health of every car in the event log
//!
//! Wires together:
//! - Configuration loading
//! - The event-log source and its cache
//! - The health evaluator
//! - Text or JSON rendering

use anyhow::{Context, Result};
use carlog_config::{load_config, Settings};
use carlog_report::{build_evaluator, open_cached_source, Report, ReportOptions};
use carlog_util::{default_config_path, is_mock_time_active, CarId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// carlog-report - Maintenance health report for a car fleet log
#[derive(Parser, Debug)]
#[command(name = "carlog-report")]
#[command(about = "Maintenance health report for a car fleet log", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/carlog/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Event-log path override (or set CARLOG_LOG env var)
    #[arg(long, env = "CARLOG_LOG")]
    log: Option<PathBuf>,

    /// Show the detail table of one car only
    #[arg(long)]
    car: Option<String>,

    /// Append the fuel summary
    #[arg(long)]
    fuel: bool,

    /// Evaluate as of this date (YYYY-MM-DD, taken at noon)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        warn!(config_path = %path.display(), "Config file not found, using defaults");
        return Ok(Settings::default());
    }
    load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
}

fn evaluation_time(today: Option<NaiveDate>) -> NaiveDateTime {
    match today {
        Some(date) => date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
        None => carlog_util::now(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mock_time = is_mock_time_active(),
        "carlog-report starting"
    );

    let settings = load_settings(&args.config)?;
    let evaluator = build_evaluator(&settings);

    let source = open_cached_source(&settings.source, args.log.as_deref())
        .context("Failed to open event log")?;
    let snapshot = source
        .snapshot()
        .with_context(|| format!("Failed to read event log {}", source.inner().describe()))?;

    let options = ReportOptions {
        car: args.car.map(CarId::new),
        fuel: args.fuel,
    };
    let now = evaluation_time(args.today);
    let report = Report::build(&evaluator, &snapshot, now, &options)
        .context("Failed to evaluate event log")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }

    Ok(())
}
