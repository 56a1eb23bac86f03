//! Check execution runner
//!
//! Runs the selected checks one after another and reports each result as
//! it completes.

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info};

use crate::checks::{HealthCheck, InpaintCheck, ModelCheck};
use crate::config::CheckConfig;
use crate::http::HttpClient;
use crate::models::{CheckKind, CheckResult, CheckSelection, RunSummary};
use crate::output::{OutputFormat, ResultFormatter};

/// Runner for IOPaint service checks
pub struct CheckRunner {
    config: CheckConfig,
    client: HttpClient,
    formatter: ResultFormatter,
    quiet: bool,
}

impl CheckRunner {
    /// Create a new check runner
    pub fn new(config: CheckConfig) -> Result<Self> {
        let client =
            HttpClient::with_timeout(config.inpaint_timeout_secs)?.base_url(&config.base_url);
        Ok(Self {
            config,
            client,
            formatter: ResultFormatter::default(),
            quiet: false,
        })
    }

    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Suppress the console report
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn emit(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Run a single check; never fails, errors become a failed result
    pub async fn run_check(&self, check: CheckKind) -> CheckResult {
        match check {
            CheckKind::Health => self.check_health().await,
            CheckKind::Inpaint => self.test_inpaint().await,
            CheckKind::Model => self.check_model().await,
        }
    }

    pub async fn check_health(&self) -> CheckResult {
        let check = HealthCheck::new(self.config.health_timeout_secs);
        settle(CheckKind::Health, check.run(&self.client).await)
    }

    pub async fn test_inpaint(&self) -> CheckResult {
        let check = InpaintCheck::new(
            self.config.inpaint.clone(),
            self.config.inpaint_timeout_secs,
            self.config.output_path.clone(),
        );
        settle(CheckKind::Inpaint, check.run(&self.client).await)
    }

    pub async fn check_model(&self) -> CheckResult {
        let check = ModelCheck::new(self.config.health_timeout_secs);
        settle(CheckKind::Model, check.run(&self.client).await)
    }

    /// Run health, inpaint and model checks in order
    pub async fn run_all(&self) -> RunSummary {
        self.run_checks(&CheckKind::all(), true).await
    }

    /// Run whatever the configuration selects
    pub async fn run_selection(&self) -> RunSummary {
        match self.config.selection {
            CheckSelection::All => self.run_all().await,
            selection => self.run_checks(&selection.checks(), false).await,
        }
    }

    async fn run_checks(&self, checks: &[CheckKind], full_run: bool) -> RunSummary {
        info!(
            "Running {} check(s) against {}",
            checks.len(),
            self.config.base_url
        );

        let started_at = Utc::now();
        let mut results = Vec::with_capacity(checks.len());

        if full_run {
            self.emit(&self.formatter.format_banner(&self.config.base_url));
        }

        for &check in checks {
            if full_run {
                self.emit(&self.formatter.format_heading(check));
            }

            let result = self.run_check(check).await;
            info!("  {}", result);

            self.emit(&self.formatter.format_result(&result));
            if full_run && !result.passed() {
                self.emit(&self.formatter.format_failure_note(&result));
            }

            results.push(result);
        }

        let summary = RunSummary::new(&self.config.base_url, started_at, results);

        info!(
            "Run completed in {}ms - Pass: {}/{}",
            summary.total_duration_ms, summary.passed, summary.total
        );

        if full_run && self.formatter.format() == OutputFormat::Table {
            self.emit(&self.formatter.format_summary(&summary));
        }

        summary
    }
}

/// Turn an unexpected check error into an error result
fn settle(check: CheckKind, outcome: Result<CheckResult>) -> CheckResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            error!("{} failed with error: {:#}", check, e);
            CheckResult::error(check, 0, format!("{e:#}"))
        }
    }
}
