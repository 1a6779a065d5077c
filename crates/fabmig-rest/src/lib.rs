//! fabmig rest - HTTP collaborators of the reconciliation engine
//!
//! - `ClientCredentialProvider`: OAuth2 client-credentials token exchange
//! - `FabricClient`: workspace listing (source side) and create/update
//!   (target side) against the workspace management API
//!
//! Every call is blocking and uses the transport's default timeout.

pub mod auth;
pub mod client;
mod response;

pub use auth::ClientCredentialProvider;
pub use client::FabricClient;
