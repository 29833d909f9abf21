use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".traduxrc.json";

/// Tool configuration loaded from `.traduxrc.json`.
///
/// Every field has a default so an absent or partial file works; the default
/// language is handed explicitly to parsers, writers and validators rather
/// than read from a global.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Language code the `default` filename token stands for.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Target languages used when the command line names none.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Glob patterns excluded when expanding directory inputs.
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            languages: Vec::new(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{pattern}\""))?;
        }
        Ok(())
    }

    /// Loads the config file from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = config_path(dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// True when the path matches one of the ignore patterns.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignores.iter().any(|pattern| {
            Pattern::new(pattern)
                .map(|pattern| pattern.matches_path(path))
                .unwrap_or(false)
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    Ok(serde_json::to_string_pretty(&config)?)
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}
