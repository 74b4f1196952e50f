//! Tool name → handler routing.
//!
//! A tool name is reduced once to a [`ToolFamily`] through an ordered rule
//! table; the family decides which synthesizer owns the detect and install
//! steps for that tool.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod family;

pub use family::ToolFamily;

/// Which synthesizer handles a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerCategory {
    Language,
    PackageManager,
    DevTool,
    Project,
    Verification,
}

impl fmt::Display for HandlerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerCategory::Language => write!(f, "language"),
            HandlerCategory::PackageManager => write!(f, "package manager"),
            HandlerCategory::DevTool => write!(f, "dev tool"),
            HandlerCategory::Project => write!(f, "project"),
            HandlerCategory::Verification => write!(f, "verification"),
        }
    }
}

/// Route a tool name to the handler that detects and installs it.
///
/// Pure and total: unknown names fall back to [`HandlerCategory::DevTool`].
pub fn classify(tool_name: &str) -> HandlerCategory {
    ToolFamily::from_name(tool_name).category()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_win_regardless_of_surrounding_text() {
        for name in [
            "node",
            "NodeJS 20",
            "install python please",
            "PYTHON3.12",
            "Java 17 (Temurin)",
            "openjdk-java",
        ] {
            assert_eq!(classify(name), HandlerCategory::Language, "{}", name);
        }
    }

    #[test]
    fn test_package_managers() {
        assert_eq!(classify("Homebrew"), HandlerCategory::PackageManager);
        assert_eq!(classify("chocolatey"), HandlerCategory::PackageManager);
        assert_eq!(classify("apt"), HandlerCategory::PackageManager);
        assert_eq!(classify("yum"), HandlerCategory::PackageManager);
    }

    #[test]
    fn test_dev_tools_and_fallback() {
        assert_eq!(classify("docker"), HandlerCategory::DevTool);
        assert_eq!(classify("Git"), HandlerCategory::DevTool);
        assert_eq!(classify("terraform"), HandlerCategory::DevTool);
        assert_eq!(classify("PostgreSQL 15"), HandlerCategory::DevTool);
        assert_eq!(classify(""), HandlerCategory::DevTool);
    }

    #[test]
    fn test_first_matching_group_wins() {
        // contains both "python" and "docker"
        assert_eq!(classify("python-docker-sdk"), HandlerCategory::Language);
        // contains both "brew" and "git"
        assert_eq!(classify("brew-git"), HandlerCategory::PackageManager);
    }

    #[test]
    fn test_classification_is_deterministic() {
        assert_eq!(classify("kubectl"), classify("kubectl"));
    }
}
