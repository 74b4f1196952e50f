pub mod check;
pub mod install;
pub mod plan;
pub mod setup;

pub use check::CheckCommand;
pub use install::InstallCommand;
pub use plan::PlanCommand;
pub use setup::SetupCommand;
