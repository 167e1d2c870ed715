use crate::install::InstallOptions;
use crate::target::DEFAULT_DOWNLOAD_BASE;
use crate::utils::Platform;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin root used when neither the flag nor the config file sets one
pub const DEFAULT_PREFIX: &str = "/opt/mackerel-agent/plugins";

/// Optional settings file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Plugin install root
    pub prefix: Option<PathBuf>,
    /// Release host, e.g. a GitHub Enterprise instance
    pub download_base: Option<String>,
}

impl Config {
    /// `<config_dir>/mkr-plugin/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mkr-plugin").join("config.toml"))
    }

    /// Load an explicitly given config file, or the default one if present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Merge with command line overrides (flag wins over file, file over default)
    pub fn install_options(&self, prefix: Option<PathBuf>) -> InstallOptions {
        InstallOptions {
            prefix: prefix
                .or_else(|| self.prefix.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFIX)),
            download_base: self
                .download_base
                .clone()
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_BASE.to_string()),
            platform: Platform::current(),
        }
    }
}
