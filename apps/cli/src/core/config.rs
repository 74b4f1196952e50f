use onboard::domain::synthesis::InstallPolicy;
use onboard::infrastructure::{ParserConfig, DEFAULT_MAX_OUTPUT_BYTES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::CliError;

/// `~/.config/onboard/config.toml` (or the platform equivalent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run plans without asking for approval
    pub auto_execute: bool,
    /// Skip install steps for tools that are already present
    pub skip_installed: bool,
    pub log_level: String,
    /// Cap on each captured output stream, in bytes
    pub max_output_bytes: usize,
    pub parser: ParserConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_execute: false,
            skip_installed: false,
            log_level: "warn".to_string(),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            parser: ParserConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("onboard").join("config.toml"))
    }

    /// Load from an explicit path, which must exist, or from the default
    /// location, which may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Command-line flags only ever switch features on
    pub fn apply_flags(&mut self, yes: bool, skip_installed: bool) {
        self.auto_execute |= yes;
        self.skip_installed |= skip_installed;
    }

    pub fn policy(&self) -> InstallPolicy {
        if self.skip_installed {
            InstallPolicy::SkipInstalled
        } else {
            InstallPolicy::AlwaysAttempt
        }
    }
}
