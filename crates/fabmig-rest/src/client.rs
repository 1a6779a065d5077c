//! Workspace management API client
//!
//! One `FabricClient` is bound to one workspace and one bearer token. It is
//! the `ObjectSource` of the fetch phase and the `TargetMutator` of the
//! reconcile phase.

use crate::response::{status_failure, transport_failure};
use fabmig_core::decode::decode_listing;
use fabmig_core::errors::ExError;
use fabmig_core::{
    Inventory, MutationError, MutationErrorKind, ObjectCategory, ObjectSource, TargetMutator,
    WorkspaceObject,
};
use fabmig_core_types::Sensitive;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Blocking client for `{api_base}/workspaces/{workspace_id}/...`
#[derive(Debug, Clone)]
pub struct FabricClient {
    http: Client,
    api_base: String,
    workspace_id: String,
    token: Sensitive<String>,
}

impl FabricClient {
    pub fn new(
        api_base: impl Into<String>,
        workspace_id: impl Into<String>,
        token: Sensitive<String>,
    ) -> Self {
        Self::with_http_client(Client::new(), api_base, workspace_id, token)
    }

    pub fn with_http_client(
        http: Client,
        api_base: impl Into<String>,
        workspace_id: impl Into<String>,
        token: Sensitive<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            http,
            api_base,
            workspace_id: workspace_id.into(),
            token,
        }
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// Collection endpoint of `category` in this workspace
    pub fn collection_url(&self, category: ObjectCategory) -> String {
        format!(
            "{}/workspaces/{}/{}",
            self.api_base,
            self.workspace_id,
            category.segment()
        )
    }

    pub fn object_url(&self, category: ObjectCategory, object_id: &str) -> String {
        format!("{}/{}", self.collection_url(category), object_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token.expose())
    }

    /// Fetch every page of a category listing
    ///
    /// `Ok(None)` means the first page answered 404. A failure on any later
    /// page fails the whole listing so a partial inventory is never returned.
    /// A later page never reports `NotFound`: the collection exists once its
    /// first page was served. A continuation URI that was already listed
    /// fails the listing as well.
    fn fetch_listing(&self, category: ObjectCategory) -> Result<Option<Inventory>, MutationError> {
        let mut inventory = Inventory::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.collection_url(category));
        let mut page = 0usize;

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                warn!(
                    category = category.as_str(),
                    uri = %url,
                    page,
                    "continuation revisits an already listed page"
                );
                return Err(MutationError::new(
                    MutationErrorKind::Fatal,
                    format!("continuation cycle at page {}: {}", page, url),
                ));
            }

            let response = self
                .authorized(self.http.get(&url))
                .send()
                .map_err(|e| transport_failure(&e))?;

            let status = response.status();
            info!(
                category = category.as_str(),
                workspace_id = %self.workspace_id,
                page,
                status = status.as_u16(),
                "listing response"
            );

            if status == StatusCode::NOT_FOUND && page == 0 {
                return Ok(None);
            }
            if !status.is_success() {
                let failure = status_failure(response);
                return Err(if page == 0 {
                    failure
                } else {
                    continuation_failure(failure, page)
                });
            }

            let body: Value = response.json().map_err(|e| {
                MutationError::new(
                    MutationErrorKind::Fatal,
                    format!("listing body is not JSON: {}", e),
                )
            })?;
            let decoded = decode_listing(body, category);
            next = decoded.continuation_uri.clone();
            inventory.extend(decoded.into_inventory().into_entries());
            page += 1;
        }

        debug!(
            category = category.as_str(),
            entries = inventory.len(),
            pages = page,
            "listing complete"
        );
        Ok(Some(inventory))
    }

    fn send_mutation(
        &self,
        request: RequestBuilder,
        category: ObjectCategory,
        action: &'static str,
    ) -> Result<(), MutationError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| transport_failure(&e))?;

        let status = response.status();
        info!(
            category = category.as_str(),
            workspace_id = %self.workspace_id,
            action,
            status = status.as_u16(),
            "mutation response"
        );

        if status.is_success() {
            Ok(())
        } else {
            Err(status_failure(response))
        }
    }
}

/// Failure of a page after the first
///
/// A 404 here is reported as `Fatal` so callers never read it as a missing
/// collection.
fn continuation_failure(mut failure: MutationError, page: usize) -> MutationError {
    if failure.kind == MutationErrorKind::NotFound {
        failure.kind = MutationErrorKind::Fatal;
    }
    failure.message = format!("continuation page {} failed: {}", page, failure.message);
    failure
}

impl ObjectSource for FabricClient {
    fn list_inventory(&self, category: ObjectCategory) -> Result<Inventory, ExError> {
        match self.fetch_listing(category) {
            Ok(Some(inventory)) => Ok(inventory),
            Ok(None) => {
                info!(
                    category = category.as_str(),
                    workspace_id = %self.workspace_id,
                    "category not found in source workspace, treating as empty"
                );
                Ok(Inventory::new())
            }
            Err(err) => Err(ExError::from(err)
                .with_op("list_inventory")
                .with_category(category.as_str())),
        }
    }
}

impl TargetMutator for FabricClient {
    fn list_objects(&self, category: ObjectCategory) -> Result<Inventory, MutationError> {
        Ok(self.fetch_listing(category)?.unwrap_or_default())
    }

    fn create_object(
        &self,
        category: ObjectCategory,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        let request = self
            .http
            .post(self.collection_url(category))
            .json(payload.payload());
        self.send_mutation(request, category, "create")
    }

    fn update_object(
        &self,
        category: ObjectCategory,
        object_id: &str,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        let request = self
            .http
            .patch(self.object_url(category, object_id))
            .json(payload.payload());
        self.send_mutation(request, category, "update")
    }
}
