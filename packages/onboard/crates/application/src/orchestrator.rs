use domain::entities::{PlanId, SetupRequest};
use domain::planning::PlanBuilder;
use domain::ports::parser::RequestParser;
use domain::ports::shell::ShellRunner;
use domain::synthesis::{InstallPolicy, Synthesizers};
use tracing::info;

use crate::engine::ExecutionEngine;
use crate::error::OrchestratorError;
use crate::operator::{Operator, PlanDecision, ProgressReporter};
use crate::session::SessionContext;
use crate::summary::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operator declined the plan; nothing ran
    Cancelled { plan: PlanId },
    Executed { plan: PlanId, summary: RunSummary },
}

impl RunOutcome {
    pub fn plan_id(&self) -> PlanId {
        match self {
            RunOutcome::Cancelled { plan } | RunOutcome::Executed { plan, .. } => *plan,
        }
    }
}

/// Parse → plan → approve → execute, for one request at a time
pub struct Orchestrator<'a> {
    parser: &'a dyn RequestParser,
    shell: &'a dyn ShellRunner,
    operator: &'a dyn Operator,
    progress: &'a dyn ProgressReporter,
    synthesizers: Synthesizers,
    auto_execute: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        parser: &'a dyn RequestParser,
        shell: &'a dyn ShellRunner,
        operator: &'a dyn Operator,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            parser,
            shell,
            operator,
            progress,
            synthesizers: Synthesizers::new(),
            auto_execute: false,
        }
    }

    pub fn with_policy(mut self, policy: InstallPolicy) -> Self {
        self.synthesizers = self.synthesizers.with_policy(policy);
        self
    }

    /// Skip the approval prompt entirely
    pub fn auto_execute(mut self, enabled: bool) -> Self {
        self.auto_execute = enabled;
        self
    }

    pub fn synthesizers(&self) -> &Synthesizers {
        &self.synthesizers
    }

    pub async fn handle(
        &self,
        session: &mut SessionContext,
        request: SetupRequest,
    ) -> Result<RunOutcome, OrchestratorError> {
        let request_id = session.add_request(request.clone());

        let parsed = self.parser.parse(&request, session.environment()).await?;
        info!(request = %request_id, intent = ?parsed.intent, tools = parsed.tools.len(), "Parsed request");

        let plan = PlanBuilder::new(&self.synthesizers).build_request(
            request_id,
            &parsed,
            session.environment(),
        );
        let plan_id = session.insert_plan(plan);

        if !self.approve(session, plan_id).await? {
            info!(plan = %plan_id, "Plan cancelled by operator");
            return Ok(RunOutcome::Cancelled { plan: plan_id });
        }

        let summary = self.execute(session, plan_id).await?;
        Ok(RunOutcome::Executed {
            plan: plan_id,
            summary,
        })
    }

    async fn approve(&self, session: &SessionContext, plan_id: PlanId) -> Result<bool, OrchestratorError> {
        if self.auto_execute {
            return Ok(true);
        }
        let plan = session
            .plan(plan_id)
            .ok_or(OrchestratorError::UnknownPlan(plan_id))?;

        loop {
            match self.operator.approve_plan(plan).await {
                PlanDecision::Execute => return Ok(true),
                PlanDecision::Cancel => return Ok(false),
                PlanDecision::ShowDetails => self.operator.show_plan(plan).await,
            }
        }
    }

    /// Run an already-built plan from the session
    pub async fn execute(
        &self,
        session: &mut SessionContext,
        plan_id: PlanId,
    ) -> Result<RunSummary, OrchestratorError> {
        let mut plan = session.begin_execution(plan_id)?;
        let engine = ExecutionEngine::new(self.shell, &self.synthesizers, self.operator, self.progress);
        let result = engine.execute(&mut plan, session.environment()).await;
        session.finish_execution(plan);

        let summary = result?;
        info!(plan = %plan_id, %summary, "Run finished");
        Ok(summary)
    }
}
