//! Multiplication workflow and its history.
//!
//! - [`log::CalculationLog`] -- fail-soft append and history reads.
//! - [`orchestrator::MultiplicationOrchestrator`] -- read, multiply, write,
//!   record.

pub mod log;
pub mod orchestrator;

pub use log::{CalculationEntry, CalculationLog};
pub use orchestrator::{MultiplicationOrchestrator, MultiplicationOutcome};
