//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;
use std::path::PathBuf;

use super::ConfigOverrides;
use crate::models::CheckSelection;

/// Environment variable prefix
const ENV_PREFIX: &str = "IOPAINT_CHECK";

/// Configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Service URL from IOPAINT_CHECK_URL
    pub base_url: Option<String>,
    /// Check selection from IOPAINT_CHECK_TEST
    pub selection: Option<CheckSelection>,
    /// Result image path from IOPAINT_CHECK_OUTPUT
    pub output_path: Option<PathBuf>,
    /// Health/model timeout from IOPAINT_CHECK_HEALTH_TIMEOUT
    pub health_timeout_secs: Option<u64>,
    /// Inpaint timeout from IOPAINT_CHECK_INPAINT_TIMEOUT
    pub inpaint_timeout_secs: Option<u64>,
    /// Config file from IOPAINT_CHECK_CONFIG
    pub config_file: Option<PathBuf>,
    /// Verbose from IOPAINT_CHECK_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("URL"),
            selection: get_env("TEST").and_then(|s| CheckSelection::from_str(&s)),
            output_path: get_env("OUTPUT").map(PathBuf::from),
            health_timeout_secs: get_env_parse("HEALTH_TIMEOUT"),
            inpaint_timeout_secs: get_env_parse("INPAINT_TIMEOUT"),
            config_file: get_env("CONFIG").map(PathBuf::from),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            selection: self.selection,
            health_timeout_secs: self.health_timeout_secs,
            inpaint_timeout_secs: self.inpaint_timeout_secs,
            output_path: self.output_path.clone(),
        }
    }
}

fn env_name(name: &str) -> String {
    format!("{ENV_PREFIX}_{name}")
}

fn get_env(name: &str) -> Option<String> {
    env::var(env_name(name)).ok().filter(|v| !v.is_empty())
}

fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).and_then(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_name() {
        assert_eq!(env_name("URL"), "IOPAINT_CHECK_URL");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_overrides_carry_fields() {
        let env = EnvConfig {
            base_url: Some("http://10.0.0.5:8080".into()),
            selection: Some(CheckSelection::Inpaint),
            ..EnvConfig::default()
        };
        let overrides = env.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://10.0.0.5:8080"));
        assert_eq!(overrides.selection, Some(CheckSelection::Inpaint));
        assert!(overrides.output_path.is_none());
    }
}
