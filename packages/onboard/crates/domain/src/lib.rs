pub mod entities;
pub mod planning;
pub mod ports;
pub mod routing;
pub mod synthesis;
pub mod system;

pub use entities::{Command, InstallationPlan, InstallationStep, ParsedRequest, ToolRequest};
pub use planning::PlanBuilder;
pub use ports::{RequestParser, ShellRunner};
pub use routing::{classify, HandlerCategory, ToolFamily};
pub use synthesis::{InstallPolicy, Synthesizer, Synthesizers};
pub use system::{EnvironmentProber, EnvironmentSnapshot, Platform};
