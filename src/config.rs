//! Configuration file support for vm-snapshot-monitor.
//!
//! Provides YAML-based configuration through `vm-snapshot-monitor.config.yml`
//! files, including data structures, file loading, validation, and conversion
//! into per-cluster settings.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::application::dto::{ClusterSettings, ControllerOptions};
use crate::monitoring::domain::{BearerToken, ClusterConnection, RefreshInterval};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "vm-snapshot-monitor.config.yml";

/// Config files larger than this are rejected before parsing
const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

const DEFAULT_NAMESPACE: &str = "default";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub clusters: Option<Vec<ClusterEntry>>,
    pub auto_refresh: Option<bool>,
    pub interval_ms: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One monitored cluster.
#[derive(Debug, Deserialize, Default)]
pub struct ClusterEntry {
    pub name: String,
    pub api_endpoint: Option<String>,
    pub namespace: Option<String>,
    pub token: Option<String>,
    /// Name of an environment variable holding the token
    pub token_env: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let metadata = std::fs::symlink_metadata(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    if metadata.is_symlink() || !metadata.is_file() {
        bail!(
            "Config file is not a regular file: {}\n\n💡 Hint: Symbolic links and directories are not accepted.",
            path.display()
        );
    }
    if metadata.len() > MAX_CONFIG_SIZE {
        bail!(
            "Config file is too large ({} bytes): {}. Maximum allowed size is {} bytes.",
            metadata.len(),
            path.display(),
            MAX_CONFIG_SIZE
        );
    }

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(interval_ms) = config.interval_ms {
        if let Err(message) = RefreshInterval::from_millis(interval_ms) {
            bail!("Invalid config: interval_ms. {}", message);
        }
    }

    if let Some(ref clusters) = config.clusters {
        let mut seen = HashSet::new();
        for (i, entry) in clusters.iter().enumerate() {
            if entry.name.trim().is_empty() {
                bail!(
                    "Invalid config: clusters[{}].name must not be empty.\n\n\
                     💡 Hint: Give every cluster a display name (e.g., \"Cluster A (Source)\").",
                    i
                );
            }
            if !seen.insert(entry.name.as_str()) {
                bail!(
                    "Invalid config: cluster name '{}' is used more than once.",
                    entry.name
                );
            }
            if entry.token.is_some() && entry.token_env.is_some() {
                bail!(
                    "Invalid config: clusters[{}] sets both 'token' and 'token_env'.\n\n\
                     💡 Hint: Keep only one token source.",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}

impl ConfigFile {
    /// The two clusters the dashboard watches when nothing is configured
    pub fn default_clusters() -> Vec<ClusterEntry> {
        ["Cluster A (Source)", "Cluster B (Destination)"]
            .into_iter()
            .map(|name| ClusterEntry {
                name: name.to_string(),
                ..ClusterEntry::default()
            })
            .collect()
    }

    pub fn controller_options(&self) -> Result<ControllerOptions> {
        let defaults = ControllerOptions::default();
        let interval = match self.interval_ms {
            Some(ms) => RefreshInterval::from_millis(ms).map_err(anyhow::Error::msg)?,
            None => defaults.interval,
        };
        Ok(ControllerOptions {
            auto_refresh_enabled: self.auto_refresh.unwrap_or(defaults.auto_refresh_enabled),
            interval,
        })
    }

    /// Resolves every cluster entry into controller settings
    ///
    /// # Errors
    /// Returns an error if a `token_env` variable is not set
    pub fn into_cluster_settings(self) -> Result<Vec<ClusterSettings>> {
        let options = self.controller_options()?;
        let clusters = match self.clusters {
            Some(clusters) if !clusters.is_empty() => clusters,
            _ => Self::default_clusters(),
        };

        clusters
            .into_iter()
            .map(|entry| {
                let token = resolve_token(&entry)?;
                let connection = ClusterConnection::new(
                    entry.api_endpoint.unwrap_or_default(),
                    entry
                        .namespace
                        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
                    token,
                );
                Ok(ClusterSettings::new(entry.name, connection).with_options(options))
            })
            .collect()
    }
}

fn resolve_token(entry: &ClusterEntry) -> Result<BearerToken> {
    match (&entry.token, &entry.token_env) {
        (Some(token), _) => Ok(BearerToken::new(token.clone())),
        (None, Some(var)) => std::env::var(var).map(BearerToken::new).with_context(|| {
            format!(
                "Environment variable '{}' for cluster '{}' is not set\n\n💡 Hint: Export the token or use 'token' in the config file.",
                var, entry.name
            )
        }),
        (None, None) => Ok(BearerToken::default()),
    }
}
