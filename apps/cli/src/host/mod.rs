//! Terminal implementations of the engine's operator and progress seams.

pub mod operator;
pub mod progress;

pub use operator::TerminalOperator;
pub use progress::TerminalProgress;
