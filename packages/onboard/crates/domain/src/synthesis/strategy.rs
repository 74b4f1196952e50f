use crate::entities::Command;
use crate::system::platform::Platform;
use crate::system::snapshot::{EnvironmentSnapshot, PackageManagerKind};

/// Availability-gated install chain.
///
/// Candidates are tried in order; the first whose package manager is
/// installed wins. The chain always ends in something unconditional (a script
/// or a download page), so an unknown machine still gets an actionable step.
pub struct Fallback<'a> {
    env: &'a EnvironmentSnapshot,
    chosen: Option<Vec<Command>>,
}

impl<'a> Fallback<'a> {
    pub fn new(env: &'a EnvironmentSnapshot) -> Self {
        Self { env, chosen: None }
    }

    pub fn prefer<F>(mut self, manager: PackageManagerKind, commands: F) -> Self
    where
        F: FnOnce() -> Vec<Command>,
    {
        if self.chosen.is_none() && self.env.has_package_manager(manager) {
            self.chosen = Some(commands());
        }
        self
    }

    pub fn or_else<F>(self, commands: F) -> Vec<Command>
    where
        F: FnOnce() -> Vec<Command>,
    {
        self.chosen.unwrap_or_else(commands)
    }

    pub fn or_nothing(self) -> Vec<Command> {
        self.chosen.unwrap_or_default()
    }
}

/// Last resort: tell the operator where to get it and open the page
pub fn download_page(platform: Platform, what: &str, url: &str) -> Command {
    Command::new(
        format!(
            "echo \"Please download {} from {}\" && {} {}",
            what,
            url,
            platform.open_command(),
            url
        ),
        format!("Open {} download page", what),
    )
    .on(platform)
}

pub fn choco_install(package: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("choco install {} --version={} -y", package, v),
        None => format!("choco install {} -y", package),
    }
}

pub fn winget_install(id: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("winget install {} --version {}", id, v),
        None => format!("winget install {}", id),
    }
}

/// `which` on Unix, `where` on Windows
pub fn locate_command(platform: Platform, binary: &str) -> String {
    match platform {
        Platform::Windows => format!("where {}", binary),
        _ => format!("which {}", binary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(text: &str) -> Vec<Command> {
        vec![Command::new(text, "")]
    }

    #[test]
    fn test_first_available_manager_wins() {
        let env = EnvironmentSnapshot::bare(Platform::Windows)
            .with_package_manager(PackageManagerKind::Chocolatey, false)
            .with_package_manager(PackageManagerKind::Winget, true);

        let chosen = Fallback::new(&env)
            .prefer(PackageManagerKind::Chocolatey, || cmd("choco"))
            .prefer(PackageManagerKind::Winget, || cmd("winget"))
            .or_else(|| cmd("page"));
        assert_eq!(chosen[0].command, "winget");
    }

    #[test]
    fn test_unknown_environment_degrades_to_last_resort() {
        let env = EnvironmentSnapshot::bare(Platform::Windows);
        let chosen = Fallback::new(&env)
            .prefer(PackageManagerKind::Chocolatey, || cmd("choco"))
            .or_else(|| vec![download_page(Platform::Windows, "Node.js", "https://nodejs.org/")]);
        assert_eq!(
            chosen[0].command,
            "echo \"Please download Node.js from https://nodejs.org/\" && start https://nodejs.org/"
        );
        assert!(!chosen[0].requires_admin);

        let none = Fallback::new(&env)
            .prefer(PackageManagerKind::Apt, || cmd("apt"))
            .or_nothing();
        assert!(none.is_empty());
    }

    #[test]
    fn test_version_injection_helpers() {
        assert_eq!(choco_install("git", None), "choco install git -y");
        assert_eq!(
            choco_install("nodejs", Some("20.11.0")),
            "choco install nodejs --version=20.11.0 -y"
        );
        assert_eq!(
            winget_install("Git.Git", Some("2.43.0")),
            "winget install Git.Git --version 2.43.0"
        );
    }
}
