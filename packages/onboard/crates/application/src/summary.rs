use domain::entities::{InstallationPlan, StepStatus};
use std::fmt;

/// End-of-run tally for one plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pending: usize,
    /// The operator chose to stop after a failure
    pub stopped: bool,
}

impl RunSummary {
    pub fn from_plan(plan: &InstallationPlan, stopped: bool) -> Self {
        Self {
            completed: plan.count(StepStatus::Completed),
            failed: plan.count(StepStatus::Failed),
            skipped: plan.count(StepStatus::Skipped),
            pending: plan.count(StepStatus::Pending),
            stopped,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.stopped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "✓ Completed: {}  ✗ Failed: {}", self.completed, self.failed)?;
        if self.skipped > 0 {
            write!(f, "  Skipped: {}", self.skipped)?;
        }
        if self.pending > 0 {
            write!(f, "  Not run: {}", self.pending)?;
        }
        Ok(())
    }
}
