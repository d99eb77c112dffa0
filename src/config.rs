//! Application configuration
//!
//! Loaded from a YAML file; every field has a default so an empty or
//! missing file yields a usable configuration.

use crate::error::{Error, Result};
use crate::select::SelectOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log the full structure analysis of every routed JSON file
    pub log_analysis: bool,

    /// MIME type assumed when a client sends none
    pub default_mime_type: String,

    /// Tags attached to every upload
    pub default_tags: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_analysis: false,
            default_mime_type: default_mime_type(),
            default_tags: Vec::new(),
        }
    }
}

fn default_mime_type() -> String {
    "application/octet-stream".to_string()
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Selector options derived from this configuration
    pub fn select_options(&self) -> SelectOptions {
        SelectOptions {
            log_analysis: self.log_analysis,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.default_mime_type.trim().is_empty() {
            return Err(Error::config("default_mime_type must not be empty"));
        }
        if self.default_tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(Error::config("default_tags must not contain blank tags"));
        }
        Ok(())
    }
}
