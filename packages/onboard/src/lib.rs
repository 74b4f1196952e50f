//! Installation planning and execution.
//!
//! `domain` holds the pure model (snapshot, classifier, synthesizers, plan
//! builder), `infrastructure` the OS and HTTP adapters, `application` the
//! engine and orchestrator.

pub use application;
pub use domain;
pub use infrastructure;
