//! Capabilities the engine and orchestrator need from whoever is driving them.
//!
//! A terminal front-end implements these with real prompts; tests and
//! headless runs script the answers.

use async_trait::async_trait;
use domain::entities::{Command, InstallAction, InstallationPlan, InstallationStep};
use domain::system::platform::Platform;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDecision {
    Execute,
    ShowDetails,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureChoice {
    Continue,
    Stop,
}

/// The person at the keyboard. Every method blocks until they answer;
/// a dismissed prompt must be reported as the cancelling answer.
#[async_trait]
pub trait Operator: Send + Sync {
    async fn approve_plan(&self, plan: &InstallationPlan) -> PlanDecision;

    /// Called after `ShowDetails`, before asking for approval again
    async fn show_plan(&self, plan: &InstallationPlan);

    /// Shown the literal command before anything privileged runs
    async fn confirm_elevation(&self, command: &Command, platform: Platform) -> bool;

    async fn on_step_failure(&self, step: &InstallationStep) -> FailureChoice;
}

/// Emitted before each step starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgress {
    /// 1-based
    pub index: usize,
    pub total: usize,
    pub action: InstallAction,
    pub tool: String,
}

impl fmt::Display for StepProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {} {}",
            self.index,
            self.total,
            self.action.to_string().to_uppercase(),
            self.tool
        )
    }
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: &StepProgress);

    fn step_finished(&self, _step: &InstallationStep) {}
}

/// Reports nothing
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn report(&self, _progress: &StepProgress) {}
}
