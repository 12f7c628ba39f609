use crate::client::DEFAULT_COLLECTION_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub require_end_date: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_COLLECTION_URL.to_string(),
            require_end_date: false,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Directory holding `config.toml`. `EVENTDESK_CONFIG_DIR` wins over the
    /// platform default so tests and scripts can isolate themselves.
    pub fn dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var("EVENTDESK_CONFIG_DIR") {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("com", "eventdesk", "eventdesk").map(|p| p.config_dir().to_path_buf())
    }

    pub fn get_path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Loads the config file, or the defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
