//! Store configuration
//!
//! Tuning knobs for a store, loaded from `.unistore.toml`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a store does with a dispatch issued by a listener while it is
/// still notifying subscribers of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReentrancyPolicy {
    /// Apply the action after the current notification pass, before the
    /// outer dispatch returns.
    #[default]
    Queue,
    /// Fail the nested dispatch.
    Reject,
}

/// Store configuration loaded from `.unistore.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Label used in log lines emitted by the store
    #[serde(default = "default_name")]
    pub name: String,

    /// Handling of dispatches issued from listeners
    #[serde(default)]
    pub reentrancy: ReentrancyPolicy,

    /// Upper bound on actions queued by listeners during one dispatch
    #[serde(default = "default_max_queued_actions")]
    pub max_queued_actions: usize,

    /// Install the logging middleware when building a store from this config
    #[serde(default)]
    pub log_actions: bool,
}

fn default_name() -> String {
    "store".to_string()
}

fn default_max_queued_actions() -> usize {
    64
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            reentrancy: ReentrancyPolicy::default(),
            max_queued_actions: default_max_queued_actions(),
            log_actions: false,
        }
    }
}

impl StoreConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded store config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default store config");
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`StoreConfig::load`], a
    /// missing or broken file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("store name must not be empty");
        }
        if self.reentrancy == ReentrancyPolicy::Queue && self.max_queued_actions == 0 {
            bail!("max_queued_actions must be greater than 0 when reentrancy = \"queue\"");
        }
        Ok(())
    }
}
