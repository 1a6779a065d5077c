pub mod category;
pub mod inventory;
pub mod name_index;
pub mod object;

pub use category::ObjectCategory;
pub use inventory::Inventory;
pub use name_index::{DuplicateName, NameIndex};
pub use object::WorkspaceObject;

/// JSON type name for diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
