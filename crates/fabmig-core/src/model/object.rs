use crate::errors::RecordError;
use crate::model::json_type_name;
use serde_json::{Map, Value};

/// A source or target record with a usable `name`
///
/// The record is kept whole: every category-specific field is carried as an
/// opaque payload and sent unmodified on create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceObject {
    name: String,
    fields: Map<String, Value>,
}

impl WorkspaceObject {
    /// Validate an inventory entry
    ///
    /// # Errors
    ///
    /// Returns a `RecordError` when the entry is not a JSON object or has no
    /// non-empty string `name`.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let fields = value.as_object().ok_or(RecordError::NotARecord {
            found: json_type_name(value),
        })?;
        let name = match fields.get("name") {
            None => return Err(RecordError::MissingName),
            Some(Value::String(name)) if name.is_empty() => return Err(RecordError::EmptyName),
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(RecordError::NameNotString {
                    found: json_type_name(other),
                })
            }
        };
        Ok(Self {
            name,
            fields: fields.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id assigned by the owning workspace, if the record carries one
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
