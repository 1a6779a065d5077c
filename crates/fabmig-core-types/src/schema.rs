//! Canonical field keys and event names for structured logging

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Object identity
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_OBJECT_NAME: &str = "object_name";
pub const FIELD_OBJECT_ID: &str = "object_id";
pub const FIELD_OBJECT_INDEX: &str = "object_index";
pub const FIELD_WORKSPACE_ID: &str = "workspace_id";

// Transport
pub const FIELD_STATUS: &str = "status";

// Counters
pub const FIELD_CREATED: &str = "created";
pub const FIELD_UPDATED: &str = "updated";
pub const FIELD_SKIPPED: &str = "skipped";
pub const FIELD_FAILED: &str = "failed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
