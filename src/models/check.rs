//! Check result models
//!
//! Defines the checks, their results, and run summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three checks run against an IOPaint service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Health,
    Inpaint,
    Model,
}

impl CheckKind {
    /// Human-readable check name
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Health => "Server Health Check",
            CheckKind::Inpaint => "Inpaint API",
            CheckKind::Model => "Model Info",
        }
    }

    /// All checks, in run order
    pub fn all() -> Vec<CheckKind> {
        vec![CheckKind::Health, CheckKind::Inpaint, CheckKind::Model]
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which checks to run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSelection {
    Health,
    Inpaint,
    Model,
    #[default]
    All,
}

impl CheckSelection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "health" => Some(CheckSelection::Health),
            "inpaint" => Some(CheckSelection::Inpaint),
            "model" => Some(CheckSelection::Model),
            "all" => Some(CheckSelection::All),
            _ => None,
        }
    }

    /// Checks covered by this selection, in run order
    pub fn checks(&self) -> Vec<CheckKind> {
        match self {
            CheckSelection::Health => vec![CheckKind::Health],
            CheckSelection::Inpaint => vec![CheckKind::Inpaint],
            CheckSelection::Model => vec![CheckKind::Model],
            CheckSelection::All => CheckKind::all(),
        }
    }
}

/// Check execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Service answered as expected
    Pass,
    /// Service answered, but not with HTTP 200
    Fail,
    /// No usable answer: network failure or local error
    Error,
}

impl CheckStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Fail | CheckStatus::Error => "❌",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single check
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub status: CheckStatus,
    pub duration_ms: u64,
    /// Headline: what happened
    pub message: String,
    /// Supporting facts reported under the headline
    pub details: Vec<String>,
}

impl CheckResult {
    pub fn pass(check: CheckKind, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Pass, duration_ms, message)
    }

    pub fn fail(check: CheckKind, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Fail, duration_ms, message)
    }

    pub fn error(check: CheckKind, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Error, duration_ms, message)
    }

    fn new(
        check: CheckKind,
        status: CheckStatus,
        duration_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check,
            status,
            duration_ms,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms] - {}",
            self.status.symbol(),
            self.check,
            self.duration_ms,
            self.message
        )
    }
}

/// Summary of one run over the selected checks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<CheckResult>,
    ) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == CheckStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == CheckStatus::Fail)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == CheckStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            base_url: base_url.into(),
            started_at,
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Process exit status: 0 when every check passed, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}
