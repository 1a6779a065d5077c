//! Command orchestration layer
//!
//! Each phase walks the selected categories in the fixed order, one at a
//! time, and records a `CategoryOutcome` per category in the `RunSummary`.

pub mod engine_command;
pub mod fetch;
pub mod reconcile;

pub use engine_command::{apply_engine_command, select_categories, EngineCommand};
