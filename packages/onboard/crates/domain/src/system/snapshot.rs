use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::platform::{Architecture, Platform};
use crate::routing::ToolFamily;

/// Package managers the prober knows how to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Homebrew,
    Chocolatey,
    Apt,
    Yum,
    Winget,
}

impl PackageManagerKind {
    /// Managers worth probing on a given platform
    pub fn for_platform(platform: Platform) -> &'static [PackageManagerKind] {
        match platform {
            Platform::MacOS => &[PackageManagerKind::Homebrew],
            Platform::Windows => &[PackageManagerKind::Chocolatey, PackageManagerKind::Winget],
            Platform::Linux => &[
                PackageManagerKind::Homebrew,
                PackageManagerKind::Apt,
                PackageManagerKind::Yum,
            ],
        }
    }

    /// The manager a package-manager family stands for
    pub fn for_family(family: ToolFamily) -> Option<PackageManagerKind> {
        match family {
            ToolFamily::Homebrew => Some(PackageManagerKind::Homebrew),
            ToolFamily::Chocolatey => Some(PackageManagerKind::Chocolatey),
            ToolFamily::Apt => Some(PackageManagerKind::Apt),
            ToolFamily::Yum => Some(PackageManagerKind::Yum),
            _ => None,
        }
    }

    pub fn version_command(&self) -> &'static str {
        match self {
            PackageManagerKind::Homebrew => "brew --version",
            PackageManagerKind::Chocolatey => "choco --version",
            PackageManagerKind::Apt => "apt --version",
            PackageManagerKind::Yum => "yum --version",
            PackageManagerKind::Winget => "winget --version",
        }
    }

    pub fn binary(&self) -> &'static str {
        match self {
            PackageManagerKind::Homebrew => "brew",
            PackageManagerKind::Chocolatey => "choco",
            PackageManagerKind::Apt => "apt",
            PackageManagerKind::Yum => "yum",
            PackageManagerKind::Winget => "winget",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageManagerKind::Homebrew => write!(f, "homebrew"),
            PackageManagerKind::Chocolatey => write!(f, "chocolatey"),
            PackageManagerKind::Apt => write!(f, "apt"),
            PackageManagerKind::Yum => write!(f, "yum"),
            PackageManagerKind::Winget => write!(f, "winget"),
        }
    }
}

/// Result of probing a single tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDetection {
    pub tool: String,
    pub installed: bool,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

impl ToolDetection {
    pub fn missing(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            installed: false,
            version: None,
            path: None,
        }
    }

    pub fn found(tool: impl Into<String>, version: Option<String>) -> Self {
        Self {
            tool: tool.into(),
            installed: true,
            version,
            path: None,
        }
    }
}

/// Result of probing a single package manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManagerDetection {
    pub name: PackageManagerKind,
    pub installed: bool,
    pub version: Option<String>,
}

/// What the host looked like when the session started.
///
/// Built once by the prober and read-only afterwards; a fresh view of the
/// machine requires a fresh probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub platform: Platform,
    pub os_version: String,
    pub architecture: Architecture,
    pub shell: String,
    pub home_dir: PathBuf,
    pub project_path: Option<PathBuf>,
    pub tools: Vec<ToolDetection>,
    pub package_managers: Vec<PackageManagerDetection>,
}

impl EnvironmentSnapshot {
    /// A snapshot with nothing detected, mostly useful as a starting point in tests.
    pub fn bare(platform: Platform) -> Self {
        Self {
            platform,
            os_version: String::new(),
            architecture: Architecture::X86_64,
            shell: if platform == Platform::Windows {
                "powershell".to_string()
            } else {
                "bash".to_string()
            },
            home_dir: PathBuf::new(),
            project_path: None,
            tools: Vec::new(),
            package_managers: Vec::new(),
        }
    }

    pub fn with_package_manager(mut self, name: PackageManagerKind, installed: bool) -> Self {
        self.package_managers.push(PackageManagerDetection {
            name,
            installed,
            version: None,
        });
        self
    }

    pub fn with_tool(mut self, detection: ToolDetection) -> Self {
        self.tools.push(detection);
        self
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn has_package_manager(&self, kind: PackageManagerKind) -> bool {
        self.package_managers
            .iter()
            .any(|pm| pm.name == kind && pm.installed)
    }

    pub fn detection(&self, tool: &str) -> Option<&ToolDetection> {
        self.tools.iter().find(|t| t.tool == tool)
    }

    /// Detection entry for a family, looked up by the family's display name
    pub fn detection_for(&self, family: ToolFamily) -> Option<&ToolDetection> {
        self.detection(family.display_name())
    }

    /// Package managers are looked up in `package_managers`, everything
    /// else in `tools`
    pub fn is_installed(&self, family: ToolFamily) -> bool {
        match PackageManagerKind::for_family(family) {
            Some(kind) => self.has_package_manager(kind),
            None => self.detection_for(family).is_some_and(|d| d.installed),
        }
    }

    pub fn installed_tools(&self) -> impl Iterator<Item = &ToolDetection> {
        self.tools.iter().filter(|t| t.installed)
    }
}
