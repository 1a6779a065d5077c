//! Authenticated workspace sessions
//!
//! A session is a workspace client bound to one bearer token. Tokens are
//! acquired before any category is processed; a failed exchange is fatal.

#![allow(clippy::result_large_err)]

use crate::config::{MigrationConfig, Side};
use fabmig_core::errors::{ExError, ExErrorKind};
use fabmig_core::{log_op_end, log_op_error, log_op_start};
use fabmig_core::{CredentialProvider, ObjectSource, TargetMutator};
use fabmig_core_types::Sensitive;
use fabmig_rest::FabricClient;
use std::time::Instant;

/// Opens the source and target sides of a run
pub trait WorkspaceSessions {
    /// # Errors
    ///
    /// `Authentication` when the source credentials are rejected.
    fn open_source(&self) -> Result<Box<dyn ObjectSource>, ExError>;

    /// # Errors
    ///
    /// `Authentication` when the target credentials are rejected.
    fn open_target(&self) -> Result<Box<dyn TargetMutator>, ExError>;
}

/// Sessions against the workspace REST API
pub struct RestSessions<'a> {
    config: &'a MigrationConfig,
    credentials: &'a dyn CredentialProvider,
}

impl<'a> RestSessions<'a> {
    pub fn new(config: &'a MigrationConfig, credentials: &'a dyn CredentialProvider) -> Self {
        Self {
            config,
            credentials,
        }
    }

    fn client(&self, side: Side) -> Result<FabricClient, ExError> {
        let token = acquire_side_token(self.config, side, self.credentials)?;
        Ok(FabricClient::new(
            self.config.api_base_url.as_str(),
            self.config.workspace(side).workspace_id.as_str(),
            token,
        ))
    }
}

impl WorkspaceSessions for RestSessions<'_> {
    fn open_source(&self) -> Result<Box<dyn ObjectSource>, ExError> {
        Ok(Box::new(self.client(Side::Source)?))
    }

    fn open_target(&self) -> Result<Box<dyn TargetMutator>, ExError> {
        Ok(Box::new(self.client(Side::Target)?))
    }
}

/// Exchange one side's credentials for a bearer token
///
/// # Errors
///
/// Always an `Authentication` error on failure, whatever the provider reported,
/// so that the run aborts.
pub fn acquire_side_token(
    config: &MigrationConfig,
    side: Side,
    credentials: &dyn CredentialProvider,
) -> Result<Sensitive<String>, ExError> {
    let workspace_id = config.workspace(side).workspace_id.as_str();
    log_op_start!("open_session", side = side.as_str(), workspace_id = workspace_id);
    let start = Instant::now();

    let token = credentials
        .acquire_token(&config.token_request(side))
        .map_err(|e| {
            let err = if e.kind() == ExErrorKind::Authentication {
                e
            } else {
                ExError::new(ExErrorKind::Authentication)
                    .with_op("acquire_token")
                    .with_message(format!("{} credentials: {}", side, e.message()))
                    .with_source(e)
            };
            log_op_error!(
                "open_session",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                side = side.as_str()
            );
            err
        })?;

    log_op_end!(
        "open_session",
        duration_ms = start.elapsed().as_millis() as u64,
        side = side.as_str()
    );
    Ok(token)
}
