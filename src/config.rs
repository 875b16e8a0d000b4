use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Finding categories that can be selected to fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailCategory {
    Missing,
    Typos,
    Unused,
    BadValues,
}

impl FailCategory {
    pub const ALL: [FailCategory; 4] = [
        FailCategory::Missing,
        FailCategory::Typos,
        FailCategory::Unused,
        FailCategory::BadValues,
    ];
}

/// Default failure policy: missing declarations and likely typos.
pub fn default_fail_on() -> Vec<FailCategory> {
    vec![FailCategory::Missing, FailCategory::Typos]
}

#[derive(Debug, Deserialize, Default)]
pub struct EnvlintConfig {
    #[serde(default)]
    pub envlint: EnvlintSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct EnvlintSection {
    pub fail_on: Option<Vec<FailCategory>>,
    pub include: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub dotenv: Option<PathBuf>,
    pub compose: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load `envlint.toml`. A missing file yields the default (empty) config.
pub fn load_config(path: &Path) -> Result<EnvlintConfig, ConfigError> {
    if !path.exists() {
        return Ok(EnvlintConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: EnvlintConfig = toml::from_str(&content)?;
    Ok(config)
}
