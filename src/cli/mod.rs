//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::models::CheckSelection;

/// IOPaint API smoke-test tool
#[derive(Parser, Debug)]
#[command(name = "iopaint-check")]
#[command(version)]
#[command(about = "Check that an IOPaint inpainting service is up and working")]
#[command(long_about = None)]
pub struct Args {
    /// IOPaint service address [default: http://localhost:8080]
    #[arg(long)]
    pub url: Option<String>,

    /// Check to run [default: all]
    #[arg(long, value_parser = ["health", "inpaint", "model", "all"])]
    pub test: Option<String>,

    /// Where to save the inpainted image [default: test_result.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Also write the run summary to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Settings given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.url.clone(),
            selection: self.test.as_deref().and_then(CheckSelection::from_str),
            output_path: self.output.clone(),
            ..ConfigOverrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["iopaint-check"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.test.is_none());
        assert_eq!(args.format, "table");

        let overrides = args.overrides();
        assert!(overrides.base_url.is_none());
        assert!(overrides.selection.is_none());
    }

    #[test]
    fn test_url_and_test_flags() {
        let args = Args::try_parse_from([
            "iopaint-check",
            "--url",
            "http://gpu-box:8080",
            "--test",
            "health",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://gpu-box:8080"));
        assert_eq!(overrides.selection, Some(CheckSelection::Health));
    }

    #[test]
    fn test_rejects_unknown_test() {
        assert!(Args::try_parse_from(["iopaint-check", "--test", "upscale"]).is_err());
    }
}
