use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::platform::{Platform, PlatformDetector, PlatformInfo};
use super::snapshot::{EnvironmentSnapshot, PackageManagerDetection, PackageManagerKind, ToolDetection};
use super::version::extract_version;
use crate::ports::shell::ShellRunner;

/// A tool the prober looks for: the name it is reported under, how to ask for
/// its version, and the binary to resolve on PATH.
struct ToolProbe {
    name: &'static str,
    command: &'static str,
    binary: &'static str,
}

const fn probe(name: &'static str, command: &'static str, binary: &'static str) -> ToolProbe {
    ToolProbe { name, command, binary }
}

fn tool_probes(platform: Platform) -> Vec<ToolProbe> {
    let (python, pip) = if platform == Platform::Windows {
        (probe("Python", "python --version", "python"), probe("pip", "pip --version", "pip"))
    } else {
        (probe("Python", "python3 --version", "python3"), probe("pip", "pip3 --version", "pip3"))
    };

    vec![
        probe("Node.js", "node --version", "node"),
        probe("npm", "npm --version", "npm"),
        python,
        pip,
        probe("Java", "java --version", "java"),
        probe("Go", "go version", "go"),
        probe("Rust", "rustc --version", "rustc"),
        probe("Ruby", "ruby --version", "ruby"),
        probe("PHP", "php --version", "php"),
        probe("Git", "git --version", "git"),
        probe("Docker", "docker --version", "docker"),
        probe("kubectl", "kubectl version --client", "kubectl"),
        probe("Terraform", "terraform version", "terraform"),
        probe("VS Code", "code --version", "code"),
    ]
}

/// Discovers what the host already has.
///
/// Probing never fails: a binary that is missing, exits non-zero or cannot be
/// spawned is simply reported as not installed.
pub struct EnvironmentProber<'a, R: ShellRunner> {
    runner: &'a R,
    project_path: Option<PathBuf>,
}

impl<'a, R: ShellRunner> EnvironmentProber<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            project_path: None,
        }
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub async fn probe(&self) -> EnvironmentSnapshot {
        self.probe_platform(PlatformDetector::detect()).await
    }

    /// Probe as if running on `info`; the platform decides which package
    /// managers and command spellings are tried.
    pub async fn probe_platform(&self, info: PlatformInfo) -> EnvironmentSnapshot {
        let platform = info.platform;

        let mut tools = Vec::new();
        for tool in tool_probes(platform) {
            tools.push(self.detect_tool(&tool).await);
        }

        let mut package_managers = Vec::new();
        for kind in PackageManagerKind::for_platform(platform) {
            package_managers.push(self.detect_package_manager(*kind).await);
        }

        EnvironmentSnapshot {
            platform,
            os_version: info.os_version,
            architecture: info.arch,
            shell: current_shell(platform),
            home_dir: dirs::home_dir().unwrap_or_default(),
            project_path: self.project_path.clone(),
            tools,
            package_managers,
        }
    }

    /// Run a version query; `Some(version)` when it succeeded
    async fn query_version(&self, command: &str) -> Option<Option<String>> {
        match self.runner.run(command).await {
            Ok(output) if output.success() => Some(extract_version(&output.combined())),
            Ok(output) => {
                debug!(command, status = ?output.status, "Version query exited non-zero");
                None
            }
            Err(e) => {
                warn!(command, error = %e, "Version query could not run");
                None
            }
        }
    }

    async fn detect_tool(&self, tool: &ToolProbe) -> ToolDetection {
        match self.query_version(tool.command).await {
            Some(version) => {
                debug!(tool = tool.name, version = ?version, "Detected tool");
                ToolDetection {
                    path: self.runner.locate(tool.binary),
                    ..ToolDetection::found(tool.name, version)
                }
            }
            None => ToolDetection::missing(tool.name),
        }
    }

    async fn detect_package_manager(&self, kind: PackageManagerKind) -> PackageManagerDetection {
        match self.query_version(kind.version_command()).await {
            Some(version) => PackageManagerDetection {
                name: kind,
                installed: true,
                version,
            },
            None => PackageManagerDetection {
                name: kind,
                installed: false,
                version: None,
            },
        }
    }
}

/// Basename of `$SHELL`, else the platform's usual shell
fn current_shell(platform: Platform) -> String {
    std::env::var("SHELL")
        .ok()
        .and_then(|path| {
            Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            if platform == Platform::Windows {
                "powershell".to_string()
            } else {
                "bash".to_string()
            }
        })
}
