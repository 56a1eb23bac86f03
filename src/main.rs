//! IOPaint Check - smoke tests for an IOPaint inpainting service
//!
//! Runs three checks against a running service:
//!
//! - Server health: `GET /api/v1/server-config`
//! - Inpaint round-trip: `POST /api/v1/inpaint` with a synthetic image and mask
//! - Model info: `GET /api/v1/model`
//!
//! ## Usage
//!
//! ```bash
//! # Run all checks against the default address
//! iopaint-check
//!
//! # Check a remote service
//! iopaint-check --url http://gpu-box:8080
//!
//! # Run only the health check
//! iopaint-check --test health
//!
//! # Machine-readable summary
//! iopaint-check --format json
//! ```
//!
//! Exits with 0 when every selected check passes, 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

mod checks;
mod cli;
mod config;
mod executor;
mod http;
mod imaging;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{CheckConfig, ConfigFile, EnvConfig};
use executor::CheckRunner;
use output::{write_summary_to_file, OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    init_logger(LogLevel::resolve(
        args.log_level.as_deref(),
        args.verbose || env.verbose.unwrap_or(false),
    ));

    let config = load_config(&args, &env)?;
    debug!("Resolved configuration: {:?}", config);

    let format = OutputFormat::from_str(&args.format).unwrap_or_default();
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let mut runner = CheckRunner::new(config)?.with_formatter(formatter.clone());
    if format == OutputFormat::Json {
        runner = runner.quiet();
    }

    info!("Checking IOPaint service at {}", runner.config().base_url);
    let summary = runner.run_selection().await;

    if format == OutputFormat::Json {
        println!("{}", formatter.format_summary(&summary));
    }

    if let Some(path) = &args.report {
        write_summary_to_file(path, &summary, OutputFormat::Json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(ExitCode::from(summary.exit_status()))
}

fn load_config(args: &Args, env: &EnvConfig) -> Result<CheckConfig> {
    let path = args.config.as_deref().or(env.config_file.as_deref());
    let file = ConfigFile::load_optional(path)?;
    CheckConfig::resolve(file.as_ref(), env, &args.overrides())
}
