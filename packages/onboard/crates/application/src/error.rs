use domain::entities::{ParseError, PlanId, StepTransitionError};
use domain::ports::shell::ShellError;
use thiserror::Error;

/// Why a single step failed
#[derive(Error, Debug)]
pub enum StepError {
    #[error("`{command}` failed: {output}")]
    CommandFailed { command: String, output: String },

    /// The operator refused an elevated command. Kept apart from
    /// `CommandFailed` so callers can tell a refusal from a broken install.
    #[error("User cancelled elevated command: {command}")]
    ElevationDeclined { command: String },

    #[error("{0}")]
    Handler(String),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl StepError {
    pub fn is_declined(&self) -> bool {
        matches!(self, StepError::ElevationDeclined { .. })
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Plan {0} is already executing")]
    AlreadyExecuting(PlanId),

    #[error(transparent)]
    Transition(#[from] StepTransitionError),
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Could not understand the request: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("No plan with id {0}")]
    UnknownPlan(PlanId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_is_told_apart_from_failure() {
        let declined = StepError::ElevationDeclined {
            command: "sudo apt-get install -y git".into(),
        };
        let failed = StepError::CommandFailed {
            command: "brew install git".into(),
            output: "Error: No available formula".into(),
        };
        assert!(declined.is_declined());
        assert!(!failed.is_declined());
        assert!(!StepError::Handler("Unknown error".into()).is_declined());
    }
}
