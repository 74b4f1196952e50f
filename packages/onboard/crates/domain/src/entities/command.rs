use serde::{Deserialize, Serialize};
use std::fmt;

use crate::system::platform::Platform;

/// A shell command synthesized for one step. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub command: String,
    pub requires_admin: bool,
    /// Detection or verification check. A failing probe means "not installed"
    #[serde(default)]
    pub read_only: bool,
    pub platform: Option<Platform>,
    pub description: String,
}

impl Command {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            requires_admin: false,
            read_only: false,
            platform: None,
            description: description.into(),
        }
    }

    pub fn admin(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    pub fn on(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn probe(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Its failure means "not installed", not an error
    pub fn is_probe(&self) -> bool {
        self.read_only
    }

    pub fn runs_on(&self, platform: Platform) -> bool {
        self.platform.map_or(true, |p| p == platform)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        if self.requires_admin {
            write!(f, " [admin]")?;
        }
        Ok(())
    }
}
