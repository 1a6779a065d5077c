//! fabmig core - data model and reconciliation engine
//!
//! This crate holds everything with decision logic and no I/O:
//! - Workspace object model (`ObjectCategory`, `WorkspaceObject`, `Inventory`, `NameIndex`)
//! - Listing response decoding into `Inventory`
//! - Collaborator contracts (`CredentialProvider`, `ObjectSource`, `TargetMutator`)
//! - The reconciliation engine: plan create/update/skip per source object, then apply
//! - The canonical error facility and structured logging facility
//!
//! Transport, persistence and configuration live in the sibling crates and
//! reach this crate only through the collaborator traits.

pub mod collaborators;
pub mod decode;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconcile;

// Re-export commonly used types
pub use collaborators::{CredentialProvider, ObjectSource, TargetMutator, TokenRequest};
pub use errors::{ExError, ExErrorKind, MutationError, MutationErrorKind, RecordError, Result};
pub use model::{Inventory, NameIndex, ObjectCategory, WorkspaceObject};
pub use reconcile::{reconcile_category, ReconcileOptions, ReconcileReport};
