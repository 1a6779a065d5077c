//! Contracts for the collaborators around the reconciliation engine
//!
//! The engine never performs I/O itself. Credential exchange, source listing
//! and target mutation are injected through these traits, so tests can drive
//! the engine with in-memory fakes.

use crate::errors::{ExError, MutationError};
use crate::model::{Inventory, ObjectCategory, WorkspaceObject};
use fabmig_core_types::Sensitive;

/// Inputs of an OAuth2 client-credentials exchange
#[derive(Debug, Clone, Copy)]
pub struct TokenRequest<'a> {
    pub authority_url: &'a str,
    pub tenant_id: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a Sensitive<String>,
    pub resource_scope: &'a str,
}

/// Exchanges tenant/client credentials for a bearer token
pub trait CredentialProvider {
    /// # Errors
    ///
    /// Returns `ExErrorKind::Authentication` when the identity provider
    /// rejects the credentials or its response carries no token.
    #[allow(clippy::result_large_err)]
    fn acquire_token(&self, request: &TokenRequest<'_>) -> Result<Sensitive<String>, ExError>;
}

/// Read side of a source workspace
pub trait ObjectSource {
    /// List every object of `category`
    ///
    /// A category the workspace does not have yields an empty inventory.
    ///
    /// # Errors
    ///
    /// Any other failure (transport, non-success status) is returned so the
    /// caller can record it against the category.
    #[allow(clippy::result_large_err)]
    fn list_inventory(&self, category: ObjectCategory) -> Result<Inventory, ExError>;
}

/// Read/write side of a target workspace, bound to one workspace and token
pub trait TargetMutator {
    /// Current objects of `category`; not-found yields an empty inventory
    ///
    /// # Errors
    ///
    /// Returns a `MutationError` with a closed kind for any other failure.
    fn list_objects(&self, category: ObjectCategory) -> Result<Inventory, MutationError>;

    /// Create `payload` as a new object in `category`
    ///
    /// # Errors
    ///
    /// Returns a `MutationError` classifying the failure.
    fn create_object(
        &self,
        category: ObjectCategory,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError>;

    /// Overwrite target object `object_id` with the full `payload`
    ///
    /// # Errors
    ///
    /// Returns a `MutationError` classifying the failure.
    fn update_object(
        &self,
        category: ObjectCategory,
        object_id: &str,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError>;
}
