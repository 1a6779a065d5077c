//! Helpers shared by the token and workspace clients

use fabmig_core::MutationError;
use reqwest::blocking::Response;
use serde_json::Value;

const MAX_DETAIL_LEN: usize = 512;

/// Human-readable detail of a non-success response
///
/// Prefers `error.message`, then `message`, then `error_description`, then the
/// raw body; falls back to the status reason when the body is empty.
pub(crate) fn failure_detail(response: Response) -> String {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| message_of(&v))
        .unwrap_or(body);

    if detail.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    truncate(detail)
}

fn message_of(body: &Value) -> Option<String> {
    let candidates = [
        body.pointer("/error/message"),
        body.get("message"),
        body.get("error_description"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .map(str::to_string)
}

fn truncate(mut detail: String) -> String {
    if detail.len() > MAX_DETAIL_LEN {
        let mut cut = MAX_DETAIL_LEN;
        while !detail.is_char_boundary(cut) {
            cut -= 1;
        }
        detail.truncate(cut);
        detail.push_str("...");
    }
    detail
}

/// Failure that produced no response at all (connect, timeout, body read)
pub(crate) fn transport_failure(err: &reqwest::Error) -> MutationError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        format!("transport failure: {}", err)
    };
    MutationError::transient(message)
}

/// Classify a non-success response by its status
pub(crate) fn status_failure(response: Response) -> MutationError {
    let status = response.status().as_u16();
    MutationError::from_status(status, failure_detail(response))
}
