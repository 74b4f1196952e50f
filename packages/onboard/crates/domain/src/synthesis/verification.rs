use super::strategy::locate_command;
use super::{StepReport, Synthesizer};
use crate::entities::{Command, InstallAction, InstallationStep};
use crate::routing::{HandlerCategory, ToolFamily};
use crate::system::platform::Platform;
use crate::system::snapshot::EnvironmentSnapshot;

/// Judges an install by a pair of checks: the runtime plus its companion
/// (package manager, compiler driver) or, for single-binary tools, the version
/// plus where the binary resolves from.
pub struct VerificationSynthesizer;

impl VerificationSynthesizer {
    fn check(&self, family: ToolFamily, platform: Platform) -> Option<String> {
        let with_location = |probe: &str, binary: &str| {
            format!("{} && {}", probe, locate_command(platform, binary))
        };

        let check = match family {
            ToolFamily::Node => "node --version && npm --version".to_string(),
            ToolFamily::Python if platform == Platform::Windows => {
                "python --version && pip --version".to_string()
            }
            ToolFamily::Python => "python3 --version && pip3 --version".to_string(),
            ToolFamily::Java => "java --version && javac --version".to_string(),
            ToolFamily::Ruby => "ruby --version && gem --version".to_string(),
            ToolFamily::Go => "go version && go env GOROOT".to_string(),
            ToolFamily::Rust => "rustc --version && cargo --version".to_string(),
            ToolFamily::Php => "php --version && composer --version".to_string(),
            ToolFamily::Docker => "docker --version && docker compose version".to_string(),
            ToolFamily::Git => with_location("git --version", "git"),
            ToolFamily::VsCode => with_location("code --version", "code"),
            ToolFamily::Kubectl => with_location("kubectl version --client", "kubectl"),
            ToolFamily::Terraform => with_location("terraform version", "terraform"),
            ToolFamily::Homebrew => with_location("brew --version", "brew"),
            ToolFamily::Chocolatey => with_location("choco --version", "choco"),
            ToolFamily::Apt => with_location("apt --version", "apt-get"),
            ToolFamily::Yum => with_location("yum --version", "yum"),
            ToolFamily::Other => return None,
        };
        Some(check)
    }
}

impl Synthesizer for VerificationSynthesizer {
    fn category(&self) -> HandlerCategory {
        HandlerCategory::Verification
    }

    fn name(&self) -> &'static str {
        "Verification"
    }

    fn can_handle(&self, step: &InstallationStep) -> bool {
        step.action == InstallAction::Verify
    }

    fn detection_commands(&self, _step: &InstallationStep, _env: &EnvironmentSnapshot) -> Vec<Command> {
        Vec::new()
    }

    fn install_commands(&self, _step: &InstallationStep, _env: &EnvironmentSnapshot) -> Vec<Command> {
        Vec::new()
    }

    fn plan(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        if !self.can_handle(step) {
            return Vec::new();
        }
        self.check(step.family, env.platform)
            .map(|check| {
                vec![Command::new(check, format!("Verify {} installation", step.family)).probe()]
            })
            .unwrap_or_default()
    }

    fn finish(&self, step: &InstallationStep, _env: &EnvironmentSnapshot) -> StepReport {
        StepReport::ok(format!("{} verified successfully", step.tool))
    }
}
