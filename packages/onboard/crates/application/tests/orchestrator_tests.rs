mod common;

use application::{
    OrchestratorError, Orchestrator, PlanDecision, RequestParser, RunOutcome, SessionContext,
    SilentProgress, StaticParser,
};
use async_trait::async_trait;
use common::{FakeShell, ScriptedOperator};
use domain::entities::{ParseError, ParsedRequest, SetupRequest, StepStatus};
use domain::system::platform::Platform;
use domain::system::snapshot::{EnvironmentSnapshot, PackageManagerKind};

/// Stands in for a language model that answered with prose
struct ProseParser;

#[async_trait]
impl RequestParser for ProseParser {
    async fn parse(
        &self,
        _request: &SetupRequest,
        _env: &EnvironmentSnapshot,
    ) -> Result<ParsedRequest, ParseError> {
        ParsedRequest::from_response("Sorry, I can't help with that.")
    }
}

fn session() -> SessionContext {
    SessionContext::new(
        EnvironmentSnapshot::bare(Platform::MacOS).with_package_manager(PackageManagerKind::Homebrew, true),
    )
}

#[tokio::test]
async fn test_cancel_has_no_side_effects() {
    let parser = StaticParser::from_specs(&["git"]);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new().deciding(&[PlanDecision::Cancel]);
    let orchestrator = Orchestrator::new(&parser, &shell, &operator, &SilentProgress);
    let mut session = session();

    let outcome = orchestrator
        .handle(&mut session, SetupRequest::new("git"))
        .await
        .unwrap();

    let RunOutcome::Cancelled { plan } = outcome else {
        panic!("expected cancellation, got {:?}", outcome);
    };
    assert!(shell.calls().is_empty());
    let plan = session.plan(plan).unwrap();
    assert!(plan.steps.iter().all(|s| s.status == StepStatus::Pending));
}

#[tokio::test]
async fn test_dismissed_prompt_counts_as_cancel() {
    let parser = StaticParser::from_specs(&["git"]);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();
    let orchestrator = Orchestrator::new(&parser, &shell, &operator, &SilentProgress);

    let outcome = orchestrator
        .handle(&mut session(), SetupRequest::new("git"))
        .await
        .unwrap();
    assert!(matches!(outcome, RunOutcome::Cancelled { .. }));
}

#[tokio::test]
async fn test_show_plan_then_execute() {
    let parser = StaticParser::from_specs(&["git"]);
    let shell = FakeShell::new();
    let operator =
        ScriptedOperator::new().deciding(&[PlanDecision::ShowDetails, PlanDecision::Execute]);
    let orchestrator = Orchestrator::new(&parser, &shell, &operator, &SilentProgress);
    let mut session = session();

    let outcome = orchestrator
        .handle(&mut session, SetupRequest::new("git"))
        .await
        .unwrap();

    assert_eq!(*operator.plans_shown.lock().unwrap(), 1);
    let RunOutcome::Executed { plan, summary } = outcome else {
        panic!("expected execution, got {:?}", outcome);
    };
    assert_eq!(summary.completed, 3);
    assert!(!session.is_executing(plan));
    assert_eq!(session.plan(plan).unwrap().count(StepStatus::Completed), 3);
}

#[tokio::test]
async fn test_auto_execute_skips_the_gate() {
    let parser = StaticParser::from_specs(&["git", "node@18"]);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();
    let orchestrator =
        Orchestrator::new(&parser, &shell, &operator, &SilentProgress).auto_execute(true);
    let mut session = session();

    let outcome = orchestrator
        .handle(&mut session, SetupRequest::new("git and node 18"))
        .await
        .unwrap();

    let RunOutcome::Executed { summary, .. } = outcome else {
        panic!("expected execution, got {:?}", outcome);
    };
    assert_eq!(summary.completed, 6);
    assert_eq!(*operator.plans_shown.lock().unwrap(), 0);
    assert!(shell
        .calls()
        .contains(&common::Invocation::Run("brew install node@18".into())));
}

#[tokio::test]
async fn test_parse_failure_builds_no_plan() {
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new().deciding(&[PlanDecision::Execute]);
    let orchestrator = Orchestrator::new(&ProseParser, &shell, &operator, &SilentProgress);
    let mut session = session();
    let request = SetupRequest::new("make me a sandwich");
    let request_id = request.id;

    let err = orchestrator.handle(&mut session, request).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Parse(ParseError::NoJson)));
    // the request is remembered, but nothing was planned or run
    assert!(session.request(request_id).is_some());
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_project_path_installs_project_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "{}").unwrap();
    std::fs::write(dir.path().join("yarn.lock"), "").unwrap();

    let parser = StaticParser::from_specs(&["node"]);
    let shell = FakeShell::new();
    let operator = ScriptedOperator::new();
    let orchestrator =
        Orchestrator::new(&parser, &shell, &operator, &SilentProgress).auto_execute(true);
    let mut session = SessionContext::new(
        EnvironmentSnapshot::bare(Platform::MacOS)
            .with_package_manager(PackageManagerKind::Homebrew, true)
            .with_project_path(dir.path()),
    );

    let request = SetupRequest::new("node").with_project_path(dir.path());
    let outcome = orchestrator.handle(&mut session, request).await.unwrap();

    let RunOutcome::Executed { plan, summary } = outcome else {
        panic!("expected execution, got {:?}", outcome);
    };
    assert_eq!(summary.completed, 4);
    let expected = format!("cd \"{}\" && yarn install", dir.path().display());
    assert!(shell.calls().contains(&common::Invocation::Run(expected)));
    assert_eq!(session.plan(plan).unwrap().steps[3].tool, domain::planning::PROJECT_STEP_TOOL);
}
