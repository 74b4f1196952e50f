use domain::entities::{Command, InstallationPlan, InstallationStep};
use domain::ports::shell::{ShellOutput, ShellRunner};
use domain::synthesis::Synthesizers;
use domain::system::platform::Platform;
use domain::system::snapshot::EnvironmentSnapshot;
use tracing::{debug, info, warn};

use crate::error::{EngineError, StepError};
use crate::operator::{FailureChoice, Operator, ProgressReporter, StepProgress};
use crate::summary::RunSummary;

/// Recorded for privileged Unix commands, whose output goes straight to the
/// operator's terminal.
pub const TERMINAL_HANDOFF: &str = "Command executed in terminal";

/// `Start-Process` wrapper that runs `command` in an elevated PowerShell
pub fn windows_elevation(command: &str) -> String {
    format!(
        "Start-Process powershell -Verb RunAs -Wait -ArgumentList '-Command', '{}'",
        command.replace('\'', "''")
    )
}

/// Runs a plan's steps strictly in order.
///
/// The engine only ever touches step status, output and error; it never
/// reorders, adds or removes steps.
pub struct ExecutionEngine<'a> {
    shell: &'a dyn ShellRunner,
    synthesizers: &'a Synthesizers,
    operator: &'a dyn Operator,
    progress: &'a dyn ProgressReporter,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(
        shell: &'a dyn ShellRunner,
        synthesizers: &'a Synthesizers,
        operator: &'a dyn Operator,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            shell,
            synthesizers,
            operator,
            progress,
        }
    }

    pub async fn execute(
        &self,
        plan: &mut InstallationPlan,
        env: &EnvironmentSnapshot,
    ) -> Result<RunSummary, EngineError> {
        let total = plan.steps.len();
        let mut stopped = false;
        info!(plan = %plan.id, steps = total, "Executing plan");

        for (i, step) in plan.steps.iter_mut().enumerate() {
            self.progress.report(&StepProgress {
                index: i + 1,
                total,
                action: step.action,
                tool: step.tool.clone(),
            });

            if self.synthesizers.policy().skips(step, env) {
                step.skip(format!("{} is already installed", step.family))?;
                debug!(step = %step.id, "Skipped, already installed");
                self.progress.step_finished(step);
                continue;
            }

            step.begin()?;
            match self.run_step(step, env).await {
                Ok(output) => {
                    step.complete(output)?;
                    self.progress.step_finished(step);
                }
                Err(e) => {
                    if e.is_declined() {
                        info!(step = %step.id, "Elevation declined by operator");
                    } else {
                        warn!(step = %step.id, error = %e, "Step failed");
                    }
                    step.fail(e.to_string())?;
                    self.progress.step_finished(step);

                    if self.operator.on_step_failure(step).await == FailureChoice::Stop {
                        info!(plan = %plan.id, "Stopped by operator");
                        stopped = true;
                        break;
                    }
                }
            }
        }

        Ok(RunSummary::from_plan(plan, stopped))
    }

    /// Commands first, then the handler's bookkeeping. The returned text is
    /// every non-empty command output followed by the handler's line.
    async fn run_step(
        &self,
        step: &InstallationStep,
        env: &EnvironmentSnapshot,
    ) -> Result<Option<String>, StepError> {
        let commands = self.synthesizers.plan(step, env);
        let handler = self.synthesizers.get(step.handler).name();
        if commands.is_empty() {
            debug!(step = %step.id, handler, "Nothing to execute");
            return Ok(None);
        }
        debug!(step = %step.id, handler, commands = commands.len(), "Synthesized commands");

        let mut outputs = Vec::new();
        for cmd in &commands {
            if !cmd.runs_on(env.platform) {
                warn!(command = %cmd.command, platform = %env.platform, "Skipping command for another platform");
                continue;
            }
            let out = self.run_command(cmd, env.platform).await?;
            if !out.is_empty() {
                outputs.push(out);
            }
        }

        let report = self.synthesizers.finish(step, env);
        if !report.success {
            return Err(StepError::Handler(
                report.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        outputs.extend(report.output);

        Ok(Some(outputs.join("\n")))
    }

    async fn run_command(&self, cmd: &Command, platform: Platform) -> Result<String, StepError> {
        debug!(command = %cmd.command, admin = cmd.requires_admin, "Executing");

        if !cmd.requires_admin {
            let output = self.shell.run(&cmd.command).await?;
            return judge(cmd, output);
        }

        if !self.operator.confirm_elevation(cmd, platform).await {
            return Err(StepError::ElevationDeclined {
                command: cmd.command.clone(),
            });
        }

        if platform.is_unix() {
            // sudo needs a terminal to ask for the password; the exit code is
            // informational only
            let status = self.shell.run_interactive(&cmd.command).await?;
            if status != Some(0) {
                warn!(command = %cmd.command, status = ?status, "Terminal command exited non-zero");
            }
            return Ok(TERMINAL_HANDOFF.to_string());
        }

        let output = self
            .shell
            .run_powershell(&windows_elevation(&cmd.command))
            .await?;
        judge(cmd, output)
    }
}

/// Non-zero exits fail the step, except for read-only probes where they just
/// mean "not installed".
fn judge(cmd: &Command, output: ShellOutput) -> Result<String, StepError> {
    if output.success() {
        return Ok(output.combined());
    }
    let text = output.failure_text();
    if cmd.is_probe() {
        debug!(command = %cmd.command, "Probe exited non-zero");
        return Ok(text);
    }
    Err(StepError::CommandFailed {
        command: cmd.command.clone(),
        output: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_elevation_doubles_single_quotes() {
        assert_eq!(
            windows_elevation("echo 'hi'"),
            "Start-Process powershell -Verb RunAs -Wait -ArgumentList '-Command', 'echo ''hi'''"
        );
    }

    #[test]
    fn test_probe_failure_is_informational() {
        let probe = Command::new("node --version", "Check Node.js").probe();
        let out = judge(&probe, ShellOutput::failed(127, "node: command not found")).unwrap();
        assert_eq!(out, "node: command not found");

        let install = Command::new("brew install node", "Install Node.js");
        let err = judge(&install, ShellOutput::failed(1, "Error: no bottle")).unwrap_err();
        assert!(matches!(err, StepError::CommandFailed { .. }));
        assert!(err.to_string().contains("Error: no bottle"));

        let versioned = Command::new("choco install nodejs --version=20 -y", "Install Node.js");
        assert!(judge(&versioned, ShellOutput::failed(1, "1 packages failed.")).is_err());
    }
}
