use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use onboard::application::{
    Orchestrator, OrchestratorError, RequestParser, RunOutcome, SessionContext,
};
use onboard::domain::entities::{SetupRequest, StepStatus};
use onboard::domain::system::EnvironmentSnapshot;
use onboard::domain::EnvironmentProber;
use onboard::infrastructure::SystemShell;

use super::config::Config;
use super::error::CliError;
use crate::host::{TerminalOperator, TerminalProgress};
use crate::ui::{self, components::Spinner, table};

/// Everything a command needs: the merged configuration and a shell sized by it
pub struct App {
    pub config: Config,
    shell: SystemShell,
}

impl App {
    pub fn new(config: Config) -> Self {
        let shell = SystemShell::new().with_max_output(config.max_output_bytes);
        Self { config, shell }
    }

    pub async fn probe(&self, project: Option<&Path>) -> EnvironmentSnapshot {
        let spinner = Spinner::new("Inspecting environment");
        spinner.set_message("versions, package managers, PATH");
        let mut prober = EnvironmentProber::new(&self.shell);
        if let Some(path) = project {
            prober = prober.with_project_path(path);
        }
        let env = prober.probe().await;
        spinner.success(format!(
            "{} {} ({} tools found)",
            env.platform,
            env.os_version,
            env.installed_tools().count()
        ));
        debug!(?env, "Environment snapshot");
        env
    }

    /// Probe, then hand the request to the orchestrator with terminal prompts
    pub async fn run(&self, parser: &dyn RequestParser, request: SetupRequest) -> Result<()> {
        let env = self.probe(request.project_path.as_deref()).await;
        let mut session = SessionContext::new(env);

        let orchestrator = Orchestrator::new(parser, &self.shell, &TerminalOperator, &TerminalProgress)
            .with_policy(self.config.policy())
            .auto_execute(self.config.auto_execute);

        let outcome = match orchestrator.handle(&mut session, request).await {
            Ok(outcome) => outcome,
            Err(OrchestratorError::Parse(e)) => return Err(CliError::Parse(e.to_string()).into()),
            Err(e) => return Err(CliError::Runtime(e.to_string()).into()),
        };

        match outcome {
            RunOutcome::Cancelled { plan } => {
                info!(%plan, "Nothing was run");
                cliclack::outro_cancel("Cancelled, nothing was run")?;
                Ok(())
            }
            RunOutcome::Executed { plan, summary } => {
                if let Some(plan) = session.plan(plan) {
                    ui::println(table::results(plan).to_string());
                    for step in plan.steps.iter().filter(|s| s.status == StepStatus::Failed) {
                        ui::error(format!("{}: {}", step.label(), step.error.as_deref().unwrap_or("")));
                    }
                }
                if summary.is_success() {
                    cliclack::outro(summary.to_string())?;
                    Ok(())
                } else {
                    Err(CliError::Runtime(summary.to_string()).into())
                }
            }
        }
    }
}
