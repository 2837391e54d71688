use anyhow::{Context, Result};
use qr_guard_memory::DEFAULT_HISTORY_CAPACITY;
use qr_guard_providers::ResolverOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "qr-guard.yaml";
pub const CONFIG_PATH_ENV: &str = "QR_GUARD_CONFIG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history_capacity must be at least 1")]
    ZeroHistoryCapacity,
    #[error("resolver.max_redirects must be at least 1")]
    ZeroRedirects,
    #[error("invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub history_capacity: usize,
    /// Re-arm the scanner once an action has been carried out, standing in
    /// for the foreground-resume signal of a camera app.
    pub rearm_after_action: bool,
    pub launch_browser: bool,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub enabled: bool,
    pub timeout_secs: Option<u64>,
    pub max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rearm_after_action: true,
            launch_browser: false,
            resolver: ResolverConfig::default(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let options = ResolverOptions::default();
        Self {
            enabled: true,
            timeout_secs: options.timeout.map(|t| t.as_secs()),
            max_redirects: options.max_redirects,
        }
    }
}

impl ResolverConfig {
    pub fn options(&self) -> ResolverOptions {
        ResolverOptions {
            timeout: self.timeout_secs.map(Duration::from_secs),
            max_redirects: self.max_redirects,
        }
    }
}

impl Config {
    /// Explicit path, then `QR_GUARD_CONFIG`, then `qr-guard.yaml`.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `QR_GUARD_HISTORY_CAPACITY` and `QR_GUARD_RESOLVER_ENABLED`
    /// from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("QR_GUARD_HISTORY_CAPACITY") {
            self.history_capacity =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        key: "QR_GUARD_HISTORY_CAPACITY".to_string(),
                        value: value.clone(),
                    })?;
        }

        if let Some(value) = lookup("QR_GUARD_RESOLVER_ENABLED") {
            self.resolver.enabled = match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "QR_GUARD_RESOLVER_ENABLED".to_string(),
                        value,
                    })
                }
            };
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.resolver.max_redirects == 0 {
            return Err(ConfigError::ZeroRedirects);
        }
        Ok(())
    }
}
