pub mod builder;

pub use builder::{PlanBuilder, PROJECT_STEP_TOOL};
