//! Output formatters for check results
//!
//! Renders the console report and the JSON run summary.

use std::io::Write;
use std::path::Path;

use crate::models::{CheckKind, CheckResult, CheckStatus, RunSummary};

const RULE: &str = "----------------------------------------";

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Result formatter
#[derive(Clone, Debug)]
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Banner printed before a full run
    pub fn format_banner(&self, base_url: &str) -> String {
        format!("🚀 Starting IOPaint API checks against {base_url}\n")
    }

    /// Heading printed before each check of a full run
    pub fn format_heading(&self, check: CheckKind) -> String {
        format!("\n📋 {}\n{RULE}", check.name())
    }

    /// Format a single check result
    pub fn format_result(&self, result: &CheckResult) -> String {
        let headline = format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.message,
            result.duration_ms
        );

        let mut output = match result.status {
            CheckStatus::Pass => self.paint(&headline, "32"),
            CheckStatus::Fail | CheckStatus::Error => self.paint(&headline, "31"),
        };

        let bullet = if result.passed() { "   - " } else { "   " };
        for detail in &result.details {
            output.push('\n');
            output.push_str(bullet);
            output.push_str(detail);
        }

        output
    }

    /// Line printed after a failed check in a full run
    pub fn format_failure_note(&self, result: &CheckResult) -> String {
        format!("   Check failed: {}", result.check.name())
    }

    /// Format run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = format!(
            "\n📊 Results: {}/{} passed ({}ms)\n",
            summary.passed, summary.total, summary.total_duration_ms
        );

        if summary.is_all_passed() {
            output.push_str(&self.paint(
                "🎉 All checks passed! The IOPaint service is working.",
                "32",
            ));
        } else {
            output.push_str(&self.paint(
                "⚠️  Some checks failed, please check the service configuration.",
                "33",
            ));
        }

        output
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colorize {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a run summary to a file
pub fn write_summary_to_file(
    path: &Path,
    summary: &RunSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_summary() -> RunSummary {
        RunSummary::new(
            "http://localhost:8080",
            Utc::now(),
            vec![
                CheckResult::pass(CheckKind::Health, 12, "Server connection OK")
                    .with_detail("Available models: 2"),
                CheckResult::fail(CheckKind::Inpaint, 30, "Inpaint failed: 500")
                    .with_detail("Error message: boom"),
                CheckResult::pass(CheckKind::Model, 8, "Model info retrieved"),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_format_passing_result() {
        let formatter = ResultFormatter::default().no_color();
        let result = CheckResult::pass(CheckKind::Model, 8, "Model info retrieved")
            .with_detail("Current model: lama");

        let output = formatter.format_result(&result);
        assert_eq!(
            output,
            "✅ Model info retrieved (8ms)\n   - Current model: lama"
        );
    }

    #[test]
    fn test_format_failing_result() {
        let formatter = ResultFormatter::default().no_color();
        let result = CheckResult::fail(CheckKind::Inpaint, 30, "Inpaint failed: 500")
            .with_detail("Error message: boom");

        let output = formatter.format_result(&result);
        assert!(output.starts_with("❌ Inpaint failed: 500"));
        assert!(output.ends_with("\n   Error message: boom"));
        assert_eq!(
            formatter.format_failure_note(&result),
            "   Check failed: Inpaint API"
        );
    }

    #[test]
    fn test_colorized_output_has_escape_codes() {
        let formatter = ResultFormatter::default();
        let result = CheckResult::pass(CheckKind::Health, 1, "ok");
        assert!(formatter.format_result(&result).contains("\x1b[32m"));
    }

    #[test]
    fn test_table_summary() {
        let formatter = ResultFormatter::default().no_color();
        let output = formatter.format_summary(&sample_summary());
        assert!(output.contains("Results: 2/3 passed"));
        assert!(output.contains("Some checks failed"));
    }

    #[test]
    fn test_json_summary() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&sample_summary());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["passed"], 2);
        assert_eq!(value["total"], 3);
        assert_eq!(value["results"][1]["status"], "fail");
        assert_eq!(value["results"][1]["check"], "inpaint");
    }

    #[test]
    fn test_write_summary_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        write_summary_to_file(&path, &sample_summary(), OutputFormat::Json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"base_url\": \"http://localhost:8080\""));
    }
}
