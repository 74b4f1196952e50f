pub mod command;
pub mod parser;
pub mod plan;
pub mod tool;

pub use command::Command;
pub use parser::{ParseError, ParsedRequest, RequestContext, SetupIntent};
pub use plan::{
    InstallAction, InstallationPlan, InstallationStep, PlanId, StepId, StepStatus,
    StepTransitionError, TimeEstimate,
};
pub use tool::{RequestId, SetupRequest, ToolRequest};
