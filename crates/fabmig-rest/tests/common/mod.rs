//! Shared helpers for the HTTP collaborator tests

#![allow(dead_code)]

use fabmig_core_types::Sensitive;
use fabmig_rest::FabricClient;
use serde_json::{json, Value};

pub const WORKSPACE: &str = "ws-target";
pub const TOKEN: &str = "test-bearer-token";

/// Run blocking client code off the async test thread
///
/// The blocking client owns its own runtime and must be created and dropped
/// outside of an async context.
pub async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

pub fn client_for(server_uri: &str) -> FabricClient {
    FabricClient::new(
        format!("{}/v1", server_uri),
        WORKSPACE,
        Sensitive::new(TOKEN.to_string()),
    )
}

pub fn collection_path(segment: &str) -> String {
    format!("/v1/workspaces/{}/{}", WORKSPACE, segment)
}

pub fn item(name: &str, id: &str) -> Value {
    json!({"name": name, "id": id, "description": format!("{} item", name)})
}

pub fn error_body(code: &str, message: &str) -> Value {
    json!({"errorCode": code, "message": message})
}
