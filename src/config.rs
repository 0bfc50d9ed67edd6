// src/config.rs
// Optional ~/.dshrc.toml. Every key has a default, a missing file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const SH_PROMPT: &str = "dsh3> ";
pub const EXIT_CMD: &str = "exit";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Colour diagnostics on stderr
    pub color: bool,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub file: Option<PathBuf>,
    pub size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: SH_PROMPT.to_string(),
            color: true,
            history: HistoryConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig { file: None, size: 1000 }
    }
}

impl HistoryConfig {
    pub fn path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::home_dir().unwrap_or_default().join(".dsh_history")
        })
    }
}

impl Config {
    /// `$DSH_CONFIG` if set, otherwise `~/.dshrc.toml`.
    pub fn default_path() -> PathBuf {
        match std::env::var_os("DSH_CONFIG") {
            Some(p) => PathBuf::from(p),
            None => dirs::home_dir().unwrap_or_default().join(".dshrc.toml"),
        }
    }

    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Config::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }
}
