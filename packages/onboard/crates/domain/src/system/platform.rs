use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family a plan targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "darwin")]
    MacOS,
    #[serde(alias = "win32")]
    Windows,
    Linux,
}

impl Platform {
    /// True for the platforms where elevation goes through `sudo` in a terminal
    pub fn is_unix(&self) -> bool {
        matches!(self, Platform::MacOS | Platform::Linux)
    }

    /// Command that opens a URL in the default browser
    pub fn open_command(&self) -> &'static str {
        match self {
            Platform::MacOS => "open",
            Platform::Windows => "start",
            Platform::Linux => "xdg-open",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOS => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86_64,
    Aarch64,
    Arm,
    I686,
    Unknown,
}

impl Architecture {
    /// Name used by most release download URLs (`amd64`, `arm64`, ...)
    pub fn release_name(&self) -> &'static str {
        match self {
            Architecture::X86_64 => "amd64",
            Architecture::Aarch64 => "arm64",
            Architecture::Arm => "arm",
            Architecture::I686 => "386",
            // Unknown hosts get the most common build
            Architecture::Unknown => "amd64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X86_64 => write!(f, "x86_64"),
            Architecture::Aarch64 => write!(f, "aarch64"),
            Architecture::Arm => write!(f, "arm"),
            Architecture::I686 => write!(f, "i686"),
            Architecture::Unknown => write!(f, "unknown"),
        }
    }
}

/// Complete platform information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub os_version: String,
    pub arch: Architecture,
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.platform, self.os_version, self.arch)
    }
}

/// Platform detection service
pub struct PlatformDetector;

impl PlatformDetector {
    /// Detect the current platform from what the OS reports about itself
    pub fn detect() -> PlatformInfo {
        let info = os_info::get();

        PlatformInfo {
            platform: Self::platform_from(info.os_type()),
            os_version: info.version().to_string(),
            arch: Self::architecture_from(std::env::consts::ARCH),
        }
    }

    /// Everything that is neither macOS nor Windows is driven like Linux.
    pub fn platform_from(os_type: os_info::Type) -> Platform {
        match os_type {
            os_info::Type::Macos => Platform::MacOS,
            os_info::Type::Windows => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    pub fn architecture_from(arch: &str) -> Architecture {
        match arch {
            "x86_64" | "amd64" => Architecture::X86_64,
            "aarch64" | "arm64" => Architecture::Aarch64,
            "arm" => Architecture::Arm,
            "x86" | "i686" => Architecture::I686,
            _ => Architecture::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detection() {
        let info = PlatformDetector::detect();

        assert_ne!(info.arch, Architecture::Unknown);
        println!("Detected platform: {}", info);
    }

    #[test]
    fn test_sudo_platforms() {
        assert!(Platform::MacOS.is_unix());
        assert!(Platform::Linux.is_unix());
        assert!(!Platform::Windows.is_unix());
    }

    #[test]
    fn test_unlisted_systems_map_to_linux() {
        assert_eq!(
            PlatformDetector::platform_from(os_info::Type::Macos),
            Platform::MacOS
        );
        assert_eq!(
            PlatformDetector::platform_from(os_info::Type::Windows),
            Platform::Windows
        );
        assert_eq!(
            PlatformDetector::platform_from(os_info::Type::Ubuntu),
            Platform::Linux
        );
        assert_eq!(
            PlatformDetector::platform_from(os_info::Type::FreeBSD),
            Platform::Linux
        );
    }

    #[test]
    fn test_architecture_aliases() {
        assert_eq!(
            PlatformDetector::architecture_from("arm64"),
            Architecture::Aarch64
        );
        assert_eq!(Architecture::X86_64.release_name(), "amd64");
        assert_eq!(Architecture::Aarch64.release_name(), "arm64");
    }

    #[test]
    fn test_platform_serde_accepts_node_style_names() {
        let p: Platform = serde_json::from_str("\"darwin\"").unwrap();
        assert_eq!(p, Platform::MacOS);
        let p: Platform = serde_json::from_str("\"win32\"").unwrap();
        assert_eq!(p, Platform::Windows);
    }
}
