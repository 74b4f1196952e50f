use onboard::application::{ProgressReporter, StepProgress};
use onboard::domain::entities::{InstallationStep, StepStatus};

use crate::ui::{self, Theme};

/// Prints "[2/6] INSTALL node" before a step and its status after
pub struct TerminalProgress;

impl ProgressReporter for TerminalProgress {
    fn report(&self, progress: &StepProgress) {
        ui::println(Theme::primary(progress));
    }

    fn step_finished(&self, step: &InstallationStep) {
        let detail = match step.status {
            StepStatus::Failed => step.error.as_deref(),
            _ => step.output.as_deref().and_then(|o| o.lines().last()),
        };
        match detail {
            Some(d) if !d.is_empty() => {
                ui::println(format!("  {} {}", Theme::status(step.status), Theme::muted(d)))
            }
            _ => ui::println(format!("  {}", Theme::status(step.status))),
        }
    }
}
