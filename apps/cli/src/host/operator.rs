use async_trait::async_trait;
use tokio::task::spawn_blocking;

use onboard::application::{FailureChoice, Operator, PlanDecision};
use onboard::domain::entities::{Command, InstallationPlan, InstallationStep};
use onboard::domain::system::Platform;

use crate::ui::{Icon, Theme};

/// "Ready to install 2 tools. Admin privileges may be required. Continue?"
pub fn approval_prompt(plan: &InstallationPlan) -> String {
    let tools = plan.install_steps().count();
    let noun = if tools == 1 { "tool" } else { "tools" };
    let admin = if plan.requires_admin {
        " Admin privileges may be required."
    } else {
        ""
    };
    format!(
        "Ready to install {} {} ({}).{} Continue?",
        tools, noun, plan.estimated_time, admin
    )
}

/// One numbered line per install step
pub fn plan_outline(plan: &InstallationPlan) -> String {
    plan.install_steps()
        .enumerate()
        .map(|(i, step)| match &step.version {
            Some(v) => format!("{}. Install {} ({})", i + 1, step.tool, v),
            None => format!("{}. Install {}", i + 1, step.tool),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn elevation_prompt(command: &Command, platform: Platform) -> String {
    let who = if platform == Platform::Windows {
        "administrator"
    } else {
        "sudo"
    };
    format!(
        "{} This command requires {} privileges:\n{}",
        Icon::Shield,
        who,
        command.command
    )
}

pub fn failure_prompt(step: &InstallationStep) -> String {
    format!(
        "Failed to {} {}. Continue with remaining steps?",
        step.action, step.tool
    )
}

/// The failure prompt starts on "stop"
const CONTINUE_BY_DEFAULT: bool = false;

pub fn failure_choice(keep_going: bool) -> FailureChoice {
    if keep_going {
        FailureChoice::Continue
    } else {
        FailureChoice::Stop
    }
}

/// Interactive prompts via cliclack. A dismissed or broken prompt answers
/// with the cancelling choice.
pub struct TerminalOperator;

#[async_trait]
impl Operator for TerminalOperator {
    async fn approve_plan(&self, plan: &InstallationPlan) -> PlanDecision {
        let prompt = approval_prompt(plan);
        spawn_blocking(move || {
            cliclack::select(prompt)
                .item(PlanDecision::Execute, "Execute", "")
                .item(PlanDecision::ShowDetails, "Show plan", "")
                .item(PlanDecision::Cancel, "Cancel", "")
                .interact()
                .unwrap_or(PlanDecision::Cancel)
        })
        .await
        .unwrap_or(PlanDecision::Cancel)
    }

    async fn show_plan(&self, plan: &InstallationPlan) {
        let title = format!("{} Installation plan", Icon::Package);
        let _ = cliclack::note(title, plan_outline(plan));
    }

    async fn confirm_elevation(&self, command: &Command, platform: Platform) -> bool {
        let prompt = elevation_prompt(command, platform);
        spawn_blocking(move || {
            cliclack::confirm(prompt)
                .initial_value(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }

    async fn on_step_failure(&self, step: &InstallationStep) -> FailureChoice {
        if let Some(error) = &step.error {
            let _ = cliclack::log::error(Theme::muted(error));
        }
        let prompt = failure_prompt(step);
        let keep_going = spawn_blocking(move || {
            cliclack::confirm(prompt)
                .initial_value(CONTINUE_BY_DEFAULT)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false);

        failure_choice(keep_going)
    }
}
