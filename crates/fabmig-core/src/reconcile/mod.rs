//! Reconciliation of one category's source inventory into a target workspace
//!
//! A pass has two steps:
//! 1. `plan`: pure classification of every source entry into create, update
//!    (against the target id found by name) or skip (malformed record)
//! 2. `reconcile_category`: lists the target, plans, then applies the plan
//!    one object at a time, recording a per-object outcome. Failures of a
//!    single object are logged and never stop the pass.

pub mod engine;
pub mod plan;
pub mod report;

pub use engine::{reconcile_category, ReconcileOptions};
pub use plan::{plan, PlannedAction, ReconcilePlan};
pub use report::{ObjectOutcome, ObjectReport, ReconcileReport};
