//! Configuration file management
//!
//! Handles finding and loading YAML or JSON configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ConfigOverrides;
use crate::models::{CheckSelection, InpaintParams};

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./iopaint-check.yaml",
    "./iopaint-check.yml",
    "./.iopaint-check.yaml",
];

/// Configuration file structure; every field is optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub test: Option<CheckSelection>,
    pub health_timeout_secs: Option<u64>,
    pub inpaint_timeout_secs: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub inpaint: Option<InpaintParams>,
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load from an explicit path, or the first standard location found
    pub fn load_optional(path: Option<&Path>) -> Result<Option<Self>> {
        match path {
            Some(path) => Self::load(path).map(Some),
            None => Self::find().map(|path| Self::load(&path)).transpose(),
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            selection: self.test,
            health_timeout_secs: self.health_timeout_secs,
            inpaint_timeout_secs: self.inpaint_timeout_secs,
            output_path: self.output_path.clone(),
        }
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
