use super::Synthesizer;
use crate::entities::{Command, InstallationStep};
use crate::routing::{HandlerCategory, ToolFamily};
use crate::system::platform::Platform;
use crate::system::snapshot::EnvironmentSnapshot;

const HOMEBREW_BOOTSTRAP: &str =
    r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#;

const CHOCOLATEY_BOOTSTRAP: &str = "Set-ExecutionPolicy Bypass -Scope Process -Force; \
[System.Net.ServicePointManager]::SecurityProtocol = [System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
iex ((New-Object System.Net.WebClient).DownloadString('https://community.chocolatey.org/install.ps1'))";

/// Bootstraps package managers themselves
pub struct PackageManagerSynthesizer;

impl Synthesizer for PackageManagerSynthesizer {
    fn category(&self) -> HandlerCategory {
        HandlerCategory::PackageManager
    }

    fn name(&self) -> &'static str {
        "Package Manager"
    }

    fn can_handle(&self, step: &InstallationStep) -> bool {
        step.family.category() == HandlerCategory::PackageManager
    }

    fn detection_commands(&self, step: &InstallationStep, _env: &EnvironmentSnapshot) -> Vec<Command> {
        let probe = match step.family {
            ToolFamily::Homebrew => "brew --version",
            ToolFamily::Chocolatey => "choco --version",
            ToolFamily::Apt => "apt --version",
            ToolFamily::Yum => "yum --version",
            _ => return Vec::new(),
        };
        vec![Command::new(probe, format!("Check {}", step.family))]
    }

    /// apt and yum ship with their distribution; there is nothing to bootstrap.
    fn install_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        match (step.family, env.platform) {
            (ToolFamily::Homebrew, Platform::MacOS | Platform::Linux) => {
                vec![Command::new(HOMEBREW_BOOTSTRAP, "Install Homebrew").on(env.platform)]
            }
            (ToolFamily::Chocolatey, Platform::Windows) => vec![Command::new(
                CHOCOLATEY_BOOTSTRAP,
                "Install Chocolatey",
            )
            .admin()
            .on(Platform::Windows)],
            _ => Vec::new(),
        }
    }
}
