//! fabmig engine - orchestration layer
//!
//! Builds the run configuration, opens authenticated workspace sessions and
//! drives the per-category fetch and reconcile passes. All decision logic
//! lives in `fabmig-core`; this crate only sequences collaborators and
//! collects the run summary.

pub mod commands;
pub mod config;
pub mod session;
pub mod summary;

pub use config::{MigrationConfig, Side, WorkspaceConfig};
pub use summary::RunSummary;
