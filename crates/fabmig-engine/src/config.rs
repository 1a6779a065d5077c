//! Run configuration
//!
//! Built once at process entry from, in increasing precedence:
//! 1. an optional configuration file (`--config`, format detected by extension)
//! 2. a `.env` file in the working directory, loaded into the environment
//! 3. process environment variables
//!
//! Keys use the environment spelling (`SOURCE_AZURE_TENANT_ID`); in a file the
//! same names are written in lower case (`source_azure_tenant_id`).
//!
//! Every required key is checked before the first network call, and a
//! single error names all of the missing ones.

#![allow(clippy::result_large_err)]

use fabmig_core::errors::{ExError, ExErrorKind};
use fabmig_core::TokenRequest;
use fabmig_core_types::Sensitive;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.fabric.microsoft.com/v1";
pub const DEFAULT_RESOURCE_SCOPE: &str = "https://api.fabric.microsoft.com/.default";
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Configuration failures; all of them are fatal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {}", keys.join(", "))]
    Missing { keys: Vec<String> },

    #[error("invalid configuration value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("cannot read configuration: {0}")]
    Source(String),
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Missing { .. } => ExErrorKind::MissingConfig,
            ConfigError::Invalid { .. } | ConfigError::Source(_) => ExErrorKind::InvalidConfig,
        };
        ExError::new(kind)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

/// Which workspace a credential set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and identity of one workspace
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Sensitive<String>,
    /// Carried for completeness; the workspace API addresses workspaces by id only
    pub subscription_id: String,
    pub workspace_id: String,
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub source: WorkspaceConfig,
    pub target: WorkspaceConfig,
    pub authority_url: String,
    pub api_base_url: String,
    pub resource_scope: String,
    pub snapshot_dir: PathBuf,
}

impl MigrationConfig {
    /// Load from `.env`, the optional file, and the process environment
    ///
    /// # Errors
    ///
    /// `MissingConfig` naming every absent key, or `InvalidConfig` when a
    /// source cannot be read or a URL is malformed.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ExError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::Source(format!(".env: {}", e)).into()),
        }

        let mut builder = config::Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::default())
            .build()
            .map_err(|e| ConfigError::Source(e.to_string()))?;

        Ok(Self::from_settings(&settings)?)
    }

    /// Extract and validate every key from already-built settings
    ///
    /// # Errors
    ///
    /// See [`MigrationConfig::load`].
    pub fn from_settings(settings: &config::Config) -> Result<Self, ConfigError> {
        let mut reader = KeyReader::new(settings);

        let source = reader.workspace(Side::Source);
        let target = reader.workspace(Side::Target);
        let authority_url = reader.optional("authority_url", DEFAULT_AUTHORITY_URL);
        let api_base_url = reader.optional("api_base_url", DEFAULT_API_BASE_URL);
        let resource_scope = reader.optional("resource_scope", DEFAULT_RESOURCE_SCOPE);
        let snapshot_dir = reader.optional("snapshot_dir", DEFAULT_SNAPSHOT_DIR);

        if !reader.missing.is_empty() {
            return Err(ConfigError::Missing {
                keys: reader.missing,
            });
        }
        if let Some(err) = reader.invalid {
            return Err(err);
        }

        validate_url("AUTHORITY_URL", &authority_url)?;
        validate_url("API_BASE_URL", &api_base_url)?;

        match (source, target) {
            (Some(source), Some(target)) => Ok(Self {
                source,
                target,
                authority_url,
                api_base_url,
                resource_scope,
                snapshot_dir: PathBuf::from(snapshot_dir),
            }),
            _ => Err(ConfigError::Source(
                "workspace settings incomplete".to_string(),
            )),
        }
    }

    pub fn workspace(&self, side: Side) -> &WorkspaceConfig {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// Token exchange inputs for one side
    pub fn token_request(&self, side: Side) -> TokenRequest<'_> {
        let workspace = self.workspace(side);
        TokenRequest {
            authority_url: &self.authority_url,
            tenant_id: &workspace.tenant_id,
            client_id: &workspace.client_id,
            client_secret: &workspace.client_secret,
            resource_scope: &self.resource_scope,
        }
    }
}

/// Reads keys while collecting every absent one
struct KeyReader<'a> {
    settings: &'a config::Config,
    missing: Vec<String>,
    invalid: Option<ConfigError>,
}

impl<'a> KeyReader<'a> {
    fn new(settings: &'a config::Config) -> Self {
        Self {
            settings,
            missing: Vec::new(),
            invalid: None,
        }
    }

    fn lookup(&mut self, key: &str) -> Option<String> {
        match self.settings.get_string(key) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            Ok(_) | Err(config::ConfigError::NotFound(_)) => None,
            Err(e) => {
                if self.invalid.is_none() {
                    self.invalid = Some(ConfigError::Invalid {
                        key: key.to_uppercase(),
                        reason: e.to_string(),
                    });
                }
                None
            }
        }
    }

    fn required(&mut self, key: &str) -> Option<String> {
        let value = self.lookup(key);
        if value.is_none() {
            self.missing.push(key.to_uppercase());
        }
        value
    }

    fn optional(&mut self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn workspace(&mut self, side: Side) -> Option<WorkspaceConfig> {
        let prefix = side.as_str();
        let tenant_id = self.required(&format!("{}_azure_tenant_id", prefix));
        let client_id = self.required(&format!("{}_azure_client_id", prefix));
        let client_secret = self.required(&format!("{}_azure_client_secret", prefix));
        let subscription_id = self.required(&format!("{}_subscription_id", prefix));
        let workspace_id = self.required(&format!("{}_workspace_id", prefix));

        Some(WorkspaceConfig {
            tenant_id: tenant_id?,
            client_id: client_id?,
            client_secret: Sensitive::new(client_secret?),
            subscription_id: subscription_id?,
            workspace_id: workspace_id?,
        })
    }
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("expected an http(s) URL, got '{}'", value),
        })
    }
}
