//! Command synthesis.
//!
//! One synthesizer per [`HandlerCategory`]. Each is a pure function from a
//! step and the environment snapshot to an ordered list of shell commands.
//! An empty list means "nothing to execute", never an error.

use serde::{Deserialize, Serialize};

use crate::entities::{Command, InstallAction, InstallationStep};
use crate::routing::HandlerCategory;
use crate::system::snapshot::EnvironmentSnapshot;

pub mod dev_tool;
pub mod language;
pub mod package_manager;
pub mod project;
pub mod strategy;
pub mod verification;

pub use dev_tool::DevToolSynthesizer;
pub use language::LanguageSynthesizer;
pub use package_manager::PackageManagerSynthesizer;
pub use project::ProjectSynthesizer;
pub use verification::VerificationSynthesizer;

/// Outcome of a handler's bookkeeping after its commands ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl StepReport {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
        }
    }
}

pub trait Synthesizer: Send + Sync {
    fn category(&self) -> HandlerCategory;

    fn name(&self) -> &'static str;

    fn can_handle(&self, step: &InstallationStep) -> bool;

    /// Read-only probes; never elevated
    fn detection_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command>;

    fn install_commands(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command>;

    fn plan(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        match step.action {
            InstallAction::Detect => self
                .detection_commands(step, env)
                .into_iter()
                .map(Command::probe)
                .collect(),
            InstallAction::Install => self.install_commands(step, env),
            _ => Vec::new(),
        }
    }

    /// Bookkeeping once the step's commands have run
    fn finish(&self, step: &InstallationStep, _env: &EnvironmentSnapshot) -> StepReport {
        StepReport::ok(format!("{} {} initiated", step.tool, step.action))
    }
}

/// Whether an install step runs for a tool the snapshot already reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallPolicy {
    /// Install even when detected (reinstall / upgrade)
    #[default]
    AlwaysAttempt,
    SkipInstalled,
}

impl InstallPolicy {
    pub fn skips(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> bool {
        *self == InstallPolicy::SkipInstalled
            && step.action == InstallAction::Install
            && env.is_installed(step.family)
    }
}

/// The full set of synthesizers, keyed by handler category
pub struct Synthesizers {
    language: LanguageSynthesizer,
    package_manager: PackageManagerSynthesizer,
    dev_tool: DevToolSynthesizer,
    project: ProjectSynthesizer,
    verification: VerificationSynthesizer,
    policy: InstallPolicy,
}

impl Synthesizers {
    pub fn new() -> Self {
        Self {
            language: LanguageSynthesizer,
            package_manager: PackageManagerSynthesizer,
            dev_tool: DevToolSynthesizer,
            project: ProjectSynthesizer,
            verification: VerificationSynthesizer,
            policy: InstallPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: InstallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> InstallPolicy {
        self.policy
    }

    pub fn get(&self, category: HandlerCategory) -> &dyn Synthesizer {
        match category {
            HandlerCategory::Language => &self.language,
            HandlerCategory::PackageManager => &self.package_manager,
            HandlerCategory::DevTool => &self.dev_tool,
            HandlerCategory::Project => &self.project,
            HandlerCategory::Verification => &self.verification,
        }
    }

    /// Commands for a step, honouring the install policy
    pub fn plan(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> Vec<Command> {
        if self.policy.skips(step, env) {
            return Vec::new();
        }
        self.get(step.handler).plan(step, env)
    }

    pub fn finish(&self, step: &InstallationStep, env: &EnvironmentSnapshot) -> StepReport {
        self.get(step.handler).finish(step, env)
    }
}

impl Default for Synthesizers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entities::{InstallAction, InstallationStep, StepId};
    use crate::routing::{classify, HandlerCategory, ToolFamily};

    pub fn step(tool: &str, action: InstallAction, version: Option<&str>) -> InstallationStep {
        let handler = if action == InstallAction::Verify {
            HandlerCategory::Verification
        } else {
            classify(tool)
        };
        InstallationStep::new(
            StepId(1),
            handler,
            ToolFamily::from_name(tool),
            action,
            tool,
            version.map(str::to_string),
        )
    }
}
