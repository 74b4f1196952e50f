pub mod engine;
pub mod error;
pub mod operator;
pub mod orchestrator;
pub mod session;
pub mod static_parser;
pub mod summary;

pub use domain::ports::parser::RequestParser;
pub use engine::ExecutionEngine;
pub use error::{EngineError, OrchestratorError, StepError};
pub use operator::{FailureChoice, Operator, PlanDecision, ProgressReporter, SilentProgress, StepProgress};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use session::SessionContext;
pub use static_parser::StaticParser;
pub use summary::RunSummary;
