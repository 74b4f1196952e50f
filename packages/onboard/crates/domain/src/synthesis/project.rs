use std::path::Path;

use super::{StepReport, Synthesizer};
use crate::entities::{Command, InstallAction, InstallationStep};
use crate::routing::HandlerCategory;
use crate::system::platform::Platform;
use crate::system::snapshot::EnvironmentSnapshot;

const PROJECT_KEYWORDS: &[&str] = &["clone", "dependencies", "env", "setup"];

/// Project-level setup: installs a project's own dependencies based on the
/// manifests found in the project directory.
pub struct ProjectSynthesizer;

impl ProjectSynthesizer {
    fn dependency_commands(&self, root: &Path, platform: Platform) -> Vec<Command> {
        let cd = format!("cd \"{}\" && ", root.display());
        let mut commands = Vec::new();

        if root.join("package.json").exists() {
            let (tool, text) = if root.join("yarn.lock").exists() {
                ("yarn", "yarn install")
            } else if root.join("pnpm-lock.yaml").exists() {
                ("pnpm", "pnpm install")
            } else {
                ("npm", "npm install")
            };
            commands.push(Command::new(
                format!("{}{}", cd, text),
                format!("Install JavaScript dependencies with {}", tool),
            ));
        }

        if root.join("requirements.txt").exists() {
            let python = if platform == Platform::Windows { "python" } else { "python3" };
            commands.push(Command::new(
                format!("{}{} -m pip install -r requirements.txt", cd, python),
                "Install Python dependencies with pip",
            ));
        }

        if root.join("Cargo.toml").exists() {
            commands.push(Command::new(format!("{}cargo fetch", cd), "Fetch Rust dependencies"));
        }

        if root.join("go.mod").exists() {
            commands.push(Command::new(format!("{}go mod download", cd), "Download Go modules"));
        }

        commands
    }
}

impl Synthesizer for ProjectSynthesizer {
    fn category(&self) -> HandlerCategory {
        HandlerCategory::Project
    }

    fn name(&self) -> &'static str {
        "Project"
    }

    fn can_handle(&self, step: &InstallationStep) -> bool {
        let tool = step.tool.to_lowercase();
        PROJECT_KEYWORDS.iter().any(|k| tool.contains(k))
    }

    fn detection_commands(&self, _step: &InstallationStep, _env: &EnvironmentSnapshot) -> Vec<Command> {
        Vec::new()
    }

    fn install_commands(&self, _step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        match env.project_path.as_deref() {
            Some(root) => self.dependency_commands(root, env.platform),
            None => Vec::new(),
        }
    }

    fn plan(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        match step.action {
            InstallAction::Install | InstallAction::Configure => self.install_commands(step, env),
            _ => Vec::new(),
        }
    }

    fn finish(&self, step: &InstallationStep, _env: &EnvironmentSnapshot) -> StepReport {
        StepReport::ok(format!("Project {} completed", step.action))
    }
}
