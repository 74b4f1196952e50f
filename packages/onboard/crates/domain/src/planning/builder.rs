use chrono::Utc;
use tracing::debug;

use crate::entities::{
    InstallAction, InstallationPlan, InstallationStep, ParsedRequest, PlanId, RequestId, SetupIntent,
    StepId, TimeEstimate, ToolRequest,
};
use crate::routing::{HandlerCategory, ToolFamily};
use crate::synthesis::Synthesizers;
use crate::system::snapshot::EnvironmentSnapshot;

const TRIAD: [InstallAction; 3] = [
    InstallAction::Detect,
    InstallAction::Install,
    InstallAction::Verify,
];

/// Tool name of the step that installs a project's own dependencies
pub const PROJECT_STEP_TOOL: &str = "project dependencies";

/// Expands prioritized tool requests into a detect → install → verify
/// sequence. Building cannot fail: a tool nothing knows how to handle still
/// gets its three steps, they just synthesize no commands.
pub struct PlanBuilder<'a> {
    synthesizers: &'a Synthesizers,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(synthesizers: &'a Synthesizers) -> Self {
        Self { synthesizers }
    }

    pub fn build(
        &self,
        request_id: RequestId,
        tools: &[ToolRequest],
        env: &EnvironmentSnapshot,
    ) -> InstallationPlan {
        self.assemble(request_id, tools, false, env)
    }

    /// Like [`build`](Self::build), plus one project install step at the end
    /// when the request is a project setup and the snapshot knows where the
    /// project lives.
    pub fn build_request(
        &self,
        request_id: RequestId,
        parsed: &ParsedRequest,
        env: &EnvironmentSnapshot,
    ) -> InstallationPlan {
        let project = parsed.intent == SetupIntent::ProjectSetup && env.project_path.is_some();
        self.assemble(request_id, &parsed.tools, project, env)
    }

    fn assemble(
        &self,
        request_id: RequestId,
        tools: &[ToolRequest],
        project: bool,
        env: &EnvironmentSnapshot,
    ) -> InstallationPlan {
        // sort_by_key is stable, ties keep the parser's order
        let mut ordered: Vec<&ToolRequest> = tools.iter().collect();
        ordered.sort_by_key(|t| t.priority);

        let mut steps = Vec::with_capacity(ordered.len() * TRIAD.len() + 1);
        let mut next_id = 1;

        for tool in ordered {
            let family = ToolFamily::from_name(&tool.name);
            let handler = family.category();

            for action in TRIAD {
                let owner = if action == InstallAction::Verify {
                    HandlerCategory::Verification
                } else {
                    handler
                };
                steps.push(InstallationStep::new(
                    StepId(next_id),
                    owner,
                    family,
                    action,
                    &tool.name,
                    tool.version.clone(),
                ));
                next_id += 1;
            }
        }

        // dependencies go last, after the tools they need
        if project {
            steps.push(InstallationStep::new(
                StepId(next_id),
                HandlerCategory::Project,
                ToolFamily::Other,
                InstallAction::Install,
                PROJECT_STEP_TOOL,
                None,
            ));
        }

        let requires_admin = steps
            .iter()
            .flat_map(|step| self.synthesizers.plan(step, env))
            .any(|cmd| cmd.requires_admin);

        let plan = InstallationPlan {
            id: PlanId::new(),
            request_id,
            estimated_time: TimeEstimate::for_steps(steps.len()),
            steps,
            requires_admin,
            platform: env.platform,
            created_at: Utc::now(),
        };

        debug!(
            plan = %plan.id,
            steps = plan.steps.len(),
            requires_admin = plan.requires_admin,
            "Built installation plan"
        );
        plan
    }
}
