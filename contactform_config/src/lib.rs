use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATH_ENV: &str = "CONTACTFORM_CONFIG";

pub fn load() -> anyhow::Result<Config> {
    load_with_override(&config_paths(), &[])
}

pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn config_paths() -> Vec<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![DEFAULT_CONFIG_PATH.into()],
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub contact: ContactConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Minimum time between two successful submissions.
    pub cooldown: Duration,
    pub subject: String,
    pub from_name: String,
    /// Additional address the relay sends a copy to.
    pub recipient: Option<String>,
}

#[derive(Deserialize)]
pub struct RelayConfig {
    pub endpoint_override: Option<Url>,
    pub access_key: Option<String>,
    pub timeout: Duration,
}

impl RelayConfig {
    /// The configured access key, treating an empty value as absent.
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint_override", &self.endpoint_override)
            .field("access_key", &self.access_key().map(|_| "[redacted]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
