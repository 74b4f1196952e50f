#![allow(dead_code)]

use application::{FailureChoice, Operator, PlanDecision, ProgressReporter, StepProgress};
use async_trait::async_trait;
use domain::entities::{Command, InstallationPlan, InstallationStep};
use domain::ports::shell::{ShellError, ShellOutput, ShellRunner};
use domain::system::platform::Platform;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(String),
    Interactive(String),
    PowerShell(String),
}

/// Answers each command with the first rule whose pattern it contains;
/// unmatched commands succeed with empty output.
#[derive(Default)]
pub struct FakeShell {
    rules: Vec<(String, Result<ShellOutput, String>)>,
    interactive_status: Option<i32>,
    pub calls: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self {
            interactive_status: Some(0),
            ..Default::default()
        }
    }

    pub fn answer(mut self, pattern: &str, output: ShellOutput) -> Self {
        self.rules.push((pattern.to_string(), Ok(output)));
        self
    }

    /// The shell itself cannot run the command
    pub fn broken(mut self, pattern: &str, reason: &str) -> Self {
        self.rules.push((pattern.to_string(), Err(reason.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, command: &str) -> Result<ShellOutput, ShellError> {
        match self.rules.iter().find(|(p, _)| command.contains(p.as_str())) {
            Some((_, Ok(out))) => Ok(out.clone()),
            Some((_, Err(reason))) => Err(ShellError::Spawn {
                command: command.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(ShellOutput::ok("")),
        }
    }
}

#[async_trait]
impl ShellRunner for FakeShell {
    async fn run(&self, command: &str) -> Result<ShellOutput, ShellError> {
        self.calls.lock().unwrap().push(Invocation::Run(command.to_string()));
        self.respond(command)
    }

    async fn run_interactive(&self, command: &str) -> Result<Option<i32>, ShellError> {
        self.calls
            .lock()
            .unwrap()
            .push(Invocation::Interactive(command.to_string()));
        Ok(self.interactive_status)
    }

    async fn run_powershell(&self, script: &str) -> Result<ShellOutput, ShellError> {
        self.calls
            .lock()
            .unwrap()
            .push(Invocation::PowerShell(script.to_string()));
        self.respond(script)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/local/bin").join(program))
    }
}

/// Replays queued answers and records what it was asked.
/// An exhausted queue answers like a dismissed prompt.
#[derive(Default)]
pub struct ScriptedOperator {
    plan_decisions: Mutex<VecDeque<PlanDecision>>,
    elevations: Mutex<VecDeque<bool>>,
    failures: Mutex<VecDeque<FailureChoice>>,
    pub elevation_prompts: Mutex<Vec<String>>,
    pub failure_prompts: Mutex<Vec<String>>,
    pub plans_shown: Mutex<usize>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deciding(self, decisions: &[PlanDecision]) -> Self {
        self.plan_decisions.lock().unwrap().extend(decisions);
        self
    }

    pub fn elevating(self, answers: &[bool]) -> Self {
        self.elevations.lock().unwrap().extend(answers);
        self
    }

    pub fn on_failure(self, choices: &[FailureChoice]) -> Self {
        self.failures.lock().unwrap().extend(choices);
        self
    }

    pub fn elevation_prompts(&self) -> Vec<String> {
        self.elevation_prompts.lock().unwrap().clone()
    }

    pub fn failure_prompts(&self) -> Vec<String> {
        self.failure_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn approve_plan(&self, _plan: &InstallationPlan) -> PlanDecision {
        self.plan_decisions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PlanDecision::Cancel)
    }

    async fn show_plan(&self, _plan: &InstallationPlan) {
        *self.plans_shown.lock().unwrap() += 1;
    }

    async fn confirm_elevation(&self, command: &Command, _platform: Platform) -> bool {
        self.elevation_prompts
            .lock()
            .unwrap()
            .push(command.command.clone());
        self.elevations.lock().unwrap().pop_front().unwrap_or(false)
    }

    async fn on_step_failure(&self, step: &InstallationStep) -> FailureChoice {
        self.failure_prompts.lock().unwrap().push(step.label());
        self.failures
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FailureChoice::Stop)
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<StepProgress>>,
}

impl RecordingProgress {
    pub fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, progress: &StepProgress) {
        self.events.lock().unwrap().push(progress.clone());
    }
}
