//! Diagnostic logging for iopaint-check
//!
//! The check report owns stdout, so tracing output goes to stderr and
//! stays at `warn` unless `--verbose`, `--log-level` or `RUST_LOG` asks for
//! more. Only this crate's events pass the filter; reqwest and hyper stay
//! quiet at every level.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// `--log-level` wins over `--verbose`; an unknown name is ignored
    pub fn resolve(explicit: Option<&str>, verbose: bool) -> Self {
        match explicit.and_then(Self::from_str) {
            Some(level) => level,
            None if verbose => LogLevel::Debug,
            None => LogLevel::default(),
        }
    }

    /// Filter directive limited to this crate's events
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.as_level())
    }
}

/// Install the stderr subscriber; `RUST_LOG` replaces the level's filter
pub fn init_logger(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("verbose"), None);
    }

    #[test]
    fn test_log_level_resolve() {
        assert_eq!(LogLevel::resolve(None, false), LogLevel::Warn);
        assert_eq!(LogLevel::resolve(None, true), LogLevel::Debug);
        assert_eq!(LogLevel::resolve(Some("trace"), false), LogLevel::Trace);
        assert_eq!(LogLevel::resolve(Some("error"), true), LogLevel::Error);
        assert_eq!(LogLevel::resolve(Some("bogus"), true), LogLevel::Debug);
    }

    #[test]
    fn test_directive_targets_this_crate() {
        assert_eq!(LogLevel::Warn.directive(), "iopaint_check=WARN");
        assert_eq!(LogLevel::Trace.directive(), "iopaint_check=TRACE");
    }
}
