use std::collections::{HashMap, HashSet};

use domain::entities::{InstallationPlan, PlanId, RequestId, SetupRequest};
use domain::system::snapshot::EnvironmentSnapshot;

use crate::error::{EngineError, OrchestratorError};

/// Everything one session knows: the probed environment plus the requests and
/// plans it has seen, keyed by id.
///
/// A plan being executed is checked out of the map. Checking it out again
/// before it is returned is rejected, so a plan never runs twice at once.
pub struct SessionContext {
    env: EnvironmentSnapshot,
    requests: HashMap<RequestId, SetupRequest>,
    plans: HashMap<PlanId, InstallationPlan>,
    executing: HashSet<PlanId>,
}

impl SessionContext {
    pub fn new(env: EnvironmentSnapshot) -> Self {
        Self {
            env,
            requests: HashMap::new(),
            plans: HashMap::new(),
            executing: HashSet::new(),
        }
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.env
    }

    pub fn add_request(&mut self, request: SetupRequest) -> RequestId {
        let id = request.id;
        self.requests.insert(id, request);
        id
    }

    pub fn request(&self, id: RequestId) -> Option<&SetupRequest> {
        self.requests.get(&id)
    }

    pub fn insert_plan(&mut self, plan: InstallationPlan) -> PlanId {
        let id = plan.id;
        self.plans.insert(id, plan);
        id
    }

    pub fn plan(&self, id: PlanId) -> Option<&InstallationPlan> {
        self.plans.get(&id)
    }

    pub fn is_executing(&self, id: PlanId) -> bool {
        self.executing.contains(&id)
    }

    /// Take a plan out for execution
    pub fn begin_execution(&mut self, id: PlanId) -> Result<InstallationPlan, OrchestratorError> {
        if self.executing.contains(&id) {
            return Err(EngineError::AlreadyExecuting(id).into());
        }
        let plan = self
            .plans
            .remove(&id)
            .ok_or(OrchestratorError::UnknownPlan(id))?;
        self.executing.insert(id);
        Ok(plan)
    }

    /// Hand an executed plan back
    pub fn finish_execution(&mut self, plan: InstallationPlan) {
        self.executing.remove(&plan.id);
        self.plans.insert(plan.id, plan);
    }
}
