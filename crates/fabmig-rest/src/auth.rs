//! OAuth2 client-credentials token exchange

use crate::response::failure_detail;
use fabmig_core::errors::{ExError, ExErrorKind};
use fabmig_core::{CredentialProvider, TokenRequest};
use fabmig_core_types::Sensitive;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Acquires bearer tokens from `{authority}/{tenant}/oauth2/v2.0/token`
#[derive(Debug, Clone, Default)]
pub struct ClientCredentialProvider {
    http: Client,
}

impl ClientCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_client(http: Client) -> Self {
        Self { http }
    }

    pub fn token_url(authority_url: &str, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            authority_url.trim_end_matches('/'),
            tenant_id
        )
    }
}

fn auth_error(request: &TokenRequest<'_>, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Authentication)
        .with_op("acquire_token")
        .with_message(format!("tenant {}: {}", request.tenant_id, message.into()))
}

impl CredentialProvider for ClientCredentialProvider {
    fn acquire_token(&self, request: &TokenRequest<'_>) -> Result<Sensitive<String>, ExError> {
        let url = Self::token_url(request.authority_url, request.tenant_id);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", request.client_id),
            ("client_secret", request.client_secret.expose().as_str()),
            ("scope", request.resource_scope),
        ];

        debug!(tenant_id = request.tenant_id, client_id = request.client_id, "requesting token");

        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .map_err(|e| auth_error(request, format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = failure_detail(response);
            return Err(auth_error(request, format!("identity provider refused: {}", detail))
                .with_status(status.as_u16()));
        }

        let body: TokenResponse = response
            .json()
            .map_err(|e| auth_error(request, format!("unreadable token response: {}", e)))?;

        match body.access_token {
            Some(token) if !token.is_empty() => {
                debug!(tenant_id = request.tenant_id, "token acquired");
                Ok(Sensitive::new(token))
            }
            _ => Err(auth_error(request, "token response has no access_token")),
        }
    }
}
