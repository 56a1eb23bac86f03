//! Configuration module
//!
//! Resolves the check configuration from, in increasing precedence:
//! built-in defaults, a config file, `IOPAINT_CHECK_*` environment
//! variables, and command-line flags.

mod env;
mod file;

pub use env::EnvConfig;
pub use file::ConfigFile;

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::models::{CheckSelection, InpaintParams};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_OUTPUT_PATH: &str = "test_result.png";
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INPAINT_TIMEOUT_SECS: u64 = 60;

/// Resolved configuration for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Service base URL, without trailing slash
    pub base_url: String,

    /// Checks to run
    pub selection: CheckSelection,

    /// Timeout for the health and model requests
    pub health_timeout_secs: u64,

    /// Timeout for the inpaint request
    pub inpaint_timeout_secs: u64,

    /// Where the inpainted result image is written
    pub output_path: PathBuf,

    /// Parameters sent with the inpaint request
    pub inpaint: InpaintParams,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            selection: CheckSelection::All,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
            inpaint_timeout_secs: DEFAULT_INPAINT_TIMEOUT_SECS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            inpaint: InpaintParams::default(),
        }
    }
}

/// Optional settings from one configuration source
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub selection: Option<CheckSelection>,
    pub health_timeout_secs: Option<u64>,
    pub inpaint_timeout_secs: Option<u64>,
    pub output_path: Option<PathBuf>,
}

impl CheckConfig {
    #[cfg(test)]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_selection(mut self, selection: CheckSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Apply settings from a config file
    pub fn apply_file(mut self, file: &ConfigFile) -> Self {
        self = self.apply(&file.overrides());
        if let Some(inpaint) = &file.inpaint {
            self.inpaint = inpaint.clone();
        }
        self
    }

    /// Apply whichever overrides are set
    pub fn apply(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(url) = &overrides.base_url {
            self = self.with_base_url(url.as_str());
        }
        if let Some(selection) = overrides.selection {
            self = self.with_selection(selection);
        }
        if let Some(secs) = overrides.health_timeout_secs {
            self.health_timeout_secs = secs;
        }
        if let Some(secs) = overrides.inpaint_timeout_secs {
            self.inpaint_timeout_secs = secs;
        }
        if let Some(path) = &overrides.output_path {
            self = self.with_output_path(path.as_path());
        }
        self
    }

    /// Resolve the final configuration from all sources
    pub fn resolve(
        file: Option<&ConfigFile>,
        env: &EnvConfig,
        cli: &ConfigOverrides,
    ) -> Result<Self> {
        let mut config = Self::default();
        if let Some(file) = file {
            config = config.apply_file(file);
        }
        let config = config.apply(&env.overrides()).apply(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.health_timeout_secs == 0 || self.inpaint_timeout_secs == 0 {
            bail!("Timeouts must be greater than zero");
        }
        if self.inpaint.ldm_steps == 0 {
            bail!("ldm_steps must be greater than zero");
        }
        Ok(())
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.selection, CheckSelection::All);
        assert_eq!(config.health_timeout_secs, 10);
        assert_eq!(config.inpaint_timeout_secs, 60);
        assert_eq!(config.output_path, PathBuf::from("test_result.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = CheckConfig::new("http://gpu-box:8080/");
        assert_eq!(config.base_url, "http://gpu-box:8080");
    }

    #[test]
    fn test_validate_leaves_url_to_the_checks() {
        // A malformed URL is reported by each check, not rejected up front
        assert!(CheckConfig::new("localhost:8080").validate().is_ok());
        assert!(CheckConfig::new("").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = CheckConfig::default();
        config.inpaint_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_env_and_file() {
        let file = ConfigFile {
            base_url: Some("http://from-file:1".into()),
            health_timeout_secs: Some(3),
            ..ConfigFile::default()
        };
        let env = EnvConfig {
            base_url: Some("http://from-env:2".into()),
            inpaint_timeout_secs: Some(90),
            ..EnvConfig::default()
        };
        let cli = ConfigOverrides {
            base_url: Some("http://from-cli:3".into()),
            selection: Some(CheckSelection::Model),
            ..ConfigOverrides::default()
        };

        let config = CheckConfig::resolve(Some(&file), &env, &cli).unwrap();
        assert_eq!(config.base_url, "http://from-cli:3");
        assert_eq!(config.selection, CheckSelection::Model);
        assert_eq!(config.health_timeout_secs, 3);
        assert_eq!(config.inpaint_timeout_secs, 90);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            base_url: Some("http://from-file:1".into()),
            ..ConfigFile::default()
        };
        let env = EnvConfig {
            base_url: Some("http://from-env:2".into()),
            ..EnvConfig::default()
        };

        let config =
            CheckConfig::resolve(Some(&file), &env, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.base_url, "http://from-env:2");
    }

    #[test]
    fn test_file_inpaint_params_applied() {
        let file = ConfigFile {
            inpaint: Some(InpaintParams {
                ldm_steps: 30,
                sd_seed: 7,
                ..InpaintParams::default()
            }),
            ..ConfigFile::default()
        };

        let config = CheckConfig::default().apply_file(&file);
        assert_eq!(config.inpaint.ldm_steps, 30);
        assert_eq!(config.inpaint.sd_seed, 7);
        assert_eq!(config.inpaint.ldm_sampler, "plms");
    }
}
