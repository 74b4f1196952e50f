mod common;

use application::{ExecutionEngine, FailureChoice, RunSummary};
use common::{FakeShell, Invocation, RecordingProgress, ScriptedOperator};
use domain::entities::{InstallationPlan, RequestId, StepStatus, ToolRequest};
use domain::ports::shell::ShellOutput;
use domain::synthesis::{InstallPolicy, Synthesizers};
use domain::system::platform::Platform;
use domain::system::snapshot::{EnvironmentSnapshot, PackageManagerKind, ToolDetection};
use domain::PlanBuilder;
use pretty_assertions::assert_eq;

fn plan_for(set: &Synthesizers, tools: &[ToolRequest], env: &EnvironmentSnapshot) -> InstallationPlan {
    PlanBuilder::new(set).build(RequestId::new(), tools, env)
}

async fn run(
    set: &Synthesizers,
    shell: &FakeShell,
    operator: &ScriptedOperator,
    plan: &mut InstallationPlan,
    env: &EnvironmentSnapshot,
) -> RunSummary {
    let progress = RecordingProgress::default();
    ExecutionEngine::new(shell, set, operator, &progress)
        .execute(plan, env)
        .await
        .unwrap()
}

fn statuses(plan: &InstallationPlan) -> Vec<StepStatus> {
    plan.steps.iter().map(|s| s.status).collect()
}

fn mac_with_brew() -> EnvironmentSnapshot {
    EnvironmentSnapshot::bare(Platform::MacOS).with_package_manager(PackageManagerKind::Homebrew, true)
}

#[tokio::test]
async fn test_git_on_macos_runs_every_step() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("git", 1)], &env);
    let shell = FakeShell::new().answer("git --version", ShellOutput::ok("git version 2.43.0\n"));
    let operator = ScriptedOperator::new();

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(statuses(&plan), vec![StepStatus::Completed; 3]);
    assert_eq!(summary.completed, 3);
    assert!(summary.is_success());
    assert_eq!(
        shell.calls(),
        vec![
            Invocation::Run("git --version".into()),
            Invocation::Run("brew install git".into()),
            Invocation::Run("git --version && which git".into()),
        ]
    );
    assert!(plan.steps[0].output.as_deref().unwrap().starts_with("git version 2.43.0"));
    // nothing privileged, nobody asked
    assert!(operator.elevation_prompts().is_empty());
}

#[tokio::test]
async fn test_failed_version_probe_still_completes_detect() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("node", 1)], &env);
    let shell = FakeShell::new().answer("node --version", ShellOutput::failed(127, "sh: node: command not found"));
    let operator = ScriptedOperator::new();

    run(&set, &shell, &operator, &mut plan, &env).await;

    let detect = &plan.steps[0];
    assert_eq!(detect.status, StepStatus::Completed);
    assert_eq!(detect.error, None);
    assert_eq!(
        detect.output.as_deref(),
        Some("sh: node: command not found\nNode.js is not installed")
    );
    assert!(operator.failure_prompts().is_empty());
}

#[tokio::test]
async fn test_stop_after_failure_leaves_rest_pending() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("node", 1), ToolRequest::new("git", 2)], &env);
    let shell = FakeShell::new().answer(
        "brew install node@20",
        ShellOutput::failed(1, "Error: No available formula with the name \"node@20\""),
    );
    let operator = ScriptedOperator::new().on_failure(&[FailureChoice::Stop]);

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(
        statuses(&plan),
        vec![
            StepStatus::Completed,
            StepStatus::Failed,
            StepStatus::Pending,
            StepStatus::Pending,
            StepStatus::Pending,
            StepStatus::Pending,
        ]
    );
    let error = plan.steps[1].error.as_deref().unwrap();
    assert!(error.contains("No available formula"), "{}", error);
    assert_eq!(operator.failure_prompts(), vec!["install node".to_string()]);
    assert_eq!(
        summary,
        RunSummary {
            completed: 1,
            failed: 1,
            skipped: 0,
            pending: 4,
            stopped: true,
        }
    );
    // nothing ran after the failure
    assert_eq!(shell.calls().len(), 2);
}

#[tokio::test]
async fn test_continue_after_failure_runs_remaining_steps() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("node", 1), ToolRequest::new("git", 2)], &env);
    let shell = FakeShell::new().answer("brew install node", ShellOutput::failed(1, "Error: boom"));
    let operator = ScriptedOperator::new().on_failure(&[FailureChoice::Continue]);

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.completed, 5);
    assert!(!summary.stopped);
    assert!(!summary.is_success());
}

#[tokio::test]
async fn test_declined_elevation_is_a_distinct_failure() {
    let env = EnvironmentSnapshot::bare(Platform::Linux).with_package_manager(PackageManagerKind::Apt, true);
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("python", 1).with_version("3.12")], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new()
        .elevating(&[false])
        .on_failure(&[FailureChoice::Continue]);

    run(&set, &shell, &operator, &mut plan, &env).await;

    let install = &plan.steps[1];
    assert_eq!(install.status, StepStatus::Failed);
    assert!(install
        .error
        .as_deref()
        .unwrap()
        .starts_with("User cancelled elevated command"));
    assert_eq!(
        operator.elevation_prompts(),
        vec!["sudo apt-get update && sudo apt-get install -y python3.12 python3-pip".to_string()]
    );
    assert!(!shell
        .calls()
        .iter()
        .any(|c| matches!(c, Invocation::Interactive(_))));
}

#[tokio::test]
async fn test_unix_elevation_hands_off_to_terminal() {
    let env = EnvironmentSnapshot::bare(Platform::Linux).with_package_manager(PackageManagerKind::Apt, true);
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("python", 1)], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new().elevating(&[true]);

    run(&set, &shell, &operator, &mut plan, &env).await;

    let install = &plan.steps[1];
    assert_eq!(install.status, StepStatus::Completed);
    assert_eq!(
        install.output.as_deref(),
        Some("Command executed in terminal\npython installation initiated")
    );
    assert!(shell.calls().contains(&Invocation::Interactive(
        "sudo apt-get update && sudo apt-get install -y python3.11 python3-pip".into()
    )));
}

#[tokio::test]
async fn test_windows_elevation_goes_through_start_process() {
    let env = EnvironmentSnapshot::bare(Platform::Windows).with_package_manager(PackageManagerKind::Chocolatey, true);
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("docker", 1)], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new().elevating(&[true]);

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert!(summary.is_success());
    assert!(shell.calls().contains(&Invocation::PowerShell(
        "Start-Process powershell -Verb RunAs -Wait -ArgumentList '-Command', 'choco install docker-desktop -y'".into()
    )));
}

#[tokio::test]
async fn test_failed_versioned_choco_install_fails_the_step() {
    let env = EnvironmentSnapshot::bare(Platform::Windows).with_package_manager(PackageManagerKind::Chocolatey, true);
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("node", 1)], &env);
    let shell = FakeShell::new().answer(
        "choco install nodejs --version=20 -y",
        ShellOutput::failed(1, "Chocolatey installed 0/1 packages. 1 packages failed."),
    );
    let operator = ScriptedOperator::new()
        .elevating(&[true])
        .on_failure(&[FailureChoice::Stop]);

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    let install = &plan.steps[1];
    assert_eq!(install.status, StepStatus::Failed);
    assert!(install.error.as_deref().unwrap().contains("1 packages failed"));
    assert_eq!(summary.failed, 1);
    assert!(summary.stopped);
}

#[tokio::test]
async fn test_skip_policy_marks_install_skipped() {
    let env = mac_with_brew().with_tool(ToolDetection::found("Git", Some("2.43.0".into())));
    let set = Synthesizers::new().with_policy(InstallPolicy::SkipInstalled);
    let mut plan = plan_for(&set, &[ToolRequest::new("git", 1)], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(
        statuses(&plan),
        vec![StepStatus::Completed, StepStatus::Skipped, StepStatus::Completed]
    );
    assert_eq!(plan.steps[1].output.as_deref(), Some("Git is already installed"));
    assert_eq!(summary.skipped, 1);
    assert!(!shell.calls().contains(&Invocation::Run("brew install git".into())));
}

#[tokio::test]
async fn test_unroutable_tool_completes_without_touching_the_shell() {
    let env = EnvironmentSnapshot::bare(Platform::Linux);
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("PostgreSQL", 1)], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();

    let summary = run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(summary.completed, 3);
    assert!(plan.steps.iter().all(|s| s.output.is_none()));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_shell_errors_fail_the_step() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("git", 1)], &env);
    let shell = FakeShell::new().broken("brew install", "No such file or directory");
    let operator = ScriptedOperator::new().on_failure(&[FailureChoice::Continue]);

    run(&set, &shell, &operator, &mut plan, &env).await;

    assert_eq!(plan.steps[1].status, StepStatus::Failed);
    assert!(plan.steps[1].error.as_deref().unwrap().contains("No such file or directory"));
    assert_eq!(plan.steps[2].status, StepStatus::Completed);
}

#[tokio::test]
async fn test_progress_reported_before_each_step() {
    let env = mac_with_brew();
    let set = Synthesizers::new();
    let mut plan = plan_for(&set, &[ToolRequest::new("git", 1)], &env);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();
    let progress = RecordingProgress::default();

    ExecutionEngine::new(&shell, &set, &operator, &progress)
        .execute(&mut plan, &env)
        .await
        .unwrap();

    assert_eq!(
        progress.lines(),
        vec!["[1/3] DETECT git", "[2/3] INSTALL git", "[3/3] VERIFY git"]
    );
}
