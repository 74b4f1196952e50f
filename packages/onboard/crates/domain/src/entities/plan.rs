use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::tool::RequestId;
use crate::routing::{HandlerCategory, ToolFamily};
use crate::system::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallAction {
    Detect,
    Download,
    Install,
    Configure,
    Verify,
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallAction::Detect => write!(f, "detect"),
            InstallAction::Download => write!(f, "download"),
            InstallAction::Install => write!(f, "install"),
            InstallAction::Configure => write!(f, "configure"),
            InstallAction::Verify => write!(f, "verify"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Skipped,
    RequiresApproval,
}

impl StepStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::InProgress => write!(f, "in progress"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::RequiresApproval => write!(f, "requires approval"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Step {step} cannot move from {from} to {to}")]
pub struct StepTransitionError {
    pub step: StepId,
    pub from: StepStatus,
    pub to: StepStatus,
}

/// One detect/install/verify action for one tool.
///
/// Status only moves pending → in progress → completed | failed, or
/// pending → skipped. The transition methods enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationStep {
    pub id: StepId,
    pub handler: HandlerCategory,
    pub family: ToolFamily,
    pub action: InstallAction,
    pub tool: String,
    pub version: Option<String>,
    pub status: StepStatus,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl InstallationStep {
    pub fn new(
        id: StepId,
        handler: HandlerCategory,
        family: ToolFamily,
        action: InstallAction,
        tool: &str,
        version: Option<String>,
    ) -> Self {
        Self {
            id,
            handler,
            family,
            action,
            tool: tool.to_string(),
            version,
            status: StepStatus::Pending,
            output: None,
            error: None,
        }
    }

    fn transition(&mut self, expected: StepStatus, to: StepStatus) -> Result<(), StepTransitionError> {
        if self.status != expected {
            return Err(StepTransitionError {
                step: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn begin(&mut self) -> Result<(), StepTransitionError> {
        self.transition(StepStatus::Pending, StepStatus::InProgress)
    }

    pub fn complete(&mut self, output: Option<String>) -> Result<(), StepTransitionError> {
        self.transition(StepStatus::InProgress, StepStatus::Completed)?;
        self.output = output;
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), StepTransitionError> {
        self.transition(StepStatus::InProgress, StepStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    pub fn skip(&mut self, reason: impl Into<String>) -> Result<(), StepTransitionError> {
        self.transition(StepStatus::Pending, StepStatus::Skipped)?;
        self.output = Some(reason.into());
        Ok(())
    }

    /// "install Node.js (20)"
    pub fn label(&self) -> String {
        match &self.version {
            Some(v) => format!("{} {} ({})", self.action, self.tool, v),
            None => format!("{} {}", self.action, self.tool),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub Uuid);

impl PlanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plan-{}", self.0)
    }
}

/// Coarse duration bucket shown before the operator approves a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeEstimate {
    UnderFive,
    FiveToFifteen,
    FifteenToThirty,
    OverThirty,
}

impl TimeEstimate {
    /// Monotone in the step count
    pub fn for_steps(step_count: usize) -> Self {
        match step_count {
            0..=4 => TimeEstimate::UnderFive,
            5..=7 => TimeEstimate::FiveToFifteen,
            8..=14 => TimeEstimate::FifteenToThirty,
            _ => TimeEstimate::OverThirty,
        }
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeEstimate::UnderFive => write!(f, "< 5 minutes"),
            TimeEstimate::FiveToFifteen => write!(f, "5-15 minutes"),
            TimeEstimate::FifteenToThirty => write!(f, "15-30 minutes"),
            TimeEstimate::OverThirty => write!(f, "30+ minutes"),
        }
    }
}

/// Ordered steps for one setup request.
///
/// Steps are never reordered after creation; only their status, output and
/// error fields change while the plan executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationPlan {
    pub id: PlanId,
    pub request_id: RequestId,
    pub steps: Vec<InstallationStep>,
    pub estimated_time: TimeEstimate,
    pub requires_admin: bool,
    pub platform: Platform,
    pub created_at: DateTime<Utc>,
}

impl InstallationPlan {
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    pub fn install_steps(&self) -> impl Iterator<Item = &InstallationStep> {
        self.steps
            .iter()
            .filter(|s| s.action == InstallAction::Install)
    }
}
