//! Config file discovery and loading.
//!
//! Priority: `--config` flag > `BREATHE_CONFIG` env > built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use breath_core::BreathConfig;

pub const CONFIG_ENV: &str = "BREATHE_CONFIG";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag(path) => write!(f, "{}", path.display()),
            ConfigSource::Env(path) => write!(f, "{} (from {CONFIG_ENV})", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

pub fn resolve_source(explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Flag(path.to_path_buf());
    }
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(|v| ConfigSource::Env(PathBuf::from(v)))
        .unwrap_or(ConfigSource::Defaults)
}

pub fn load(explicit: Option<&Path>) -> Result<(BreathConfig, ConfigSource)> {
    let source = resolve_source(explicit);
    let config = match &source {
        ConfigSource::Flag(path) | ConfigSource::Env(path) => read_file(path)?,
        ConfigSource::Defaults => BreathConfig::default(),
    };
    tracing::debug!(%source, total_cycle = config.phase.total_cycle(), "config loaded");
    Ok((config, source))
}

pub fn read_file(path: &Path) -> Result<BreathConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid config in {}", path.display()))
}

pub fn parse(content: &str) -> Result<BreathConfig> {
    Ok(toml::from_str(content)?)
}

pub fn to_toml(config: &BreathConfig) -> Result<String> {
    toml::to_string(config).context("failed to serialize config")
}
