//! Listing response decoding
//!
//! Workspace listing endpoints answer in one of a few shapes. Each body is
//! classified into a `ListingShape` at the transport boundary so that only a
//! normalized `Inventory` ever reaches the reconciliation engine.

use crate::errors::ExErrorKind;
use crate::model::{json_type_name, Inventory, ObjectCategory};
use serde_json::{Map, Value};

/// Recognized shapes of a listing body
#[derive(Debug, Clone, PartialEq)]
pub enum ListingShape {
    /// `{"value": [...]}`
    ValueList(Vec<Value>),
    /// `{"<category>": [...]}`
    CategoryKeyed(Vec<Value>),
    /// `[...]`
    Bare(Vec<Value>),
    /// Anything else; decodes to an empty inventory
    Unrecognized { found: &'static str },
}

impl ListingShape {
    pub fn classify(body: Value, category: ObjectCategory) -> Self {
        match body {
            Value::Array(entries) => ListingShape::Bare(entries),
            Value::Object(mut fields) => {
                if let Some(entries) = take_array(&mut fields, "value") {
                    return ListingShape::ValueList(entries);
                }
                let keys = [category.as_str(), category.segment()];
                for key in keys {
                    if let Some(entries) = take_array(&mut fields, key) {
                        return ListingShape::CategoryKeyed(entries);
                    }
                }
                ListingShape::Unrecognized { found: "object" }
            }
            other => ListingShape::Unrecognized {
                found: json_type_name(&other),
            },
        }
    }

    pub fn into_entries(self) -> Vec<Value> {
        match self {
            ListingShape::ValueList(entries)
            | ListingShape::CategoryKeyed(entries)
            | ListingShape::Bare(entries) => entries,
            ListingShape::Unrecognized { .. } => Vec::new(),
        }
    }
}

fn take_array(fields: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match fields.get(key) {
        Some(Value::Array(_)) => match fields.remove(key) {
            Some(Value::Array(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    }
}

/// One decoded listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub shape: ListingShape,
    /// Absolute URI of the next page, when the listing is paginated
    pub continuation_uri: Option<String>,
}

impl ListingPage {
    pub fn into_inventory(self) -> Inventory {
        Inventory::from(self.shape.into_entries())
    }
}

/// Decode one listing body for `category`
pub fn decode_listing(body: Value, category: ObjectCategory) -> ListingPage {
    let continuation_uri = body
        .get("continuationUri")
        .and_then(Value::as_str)
        .filter(|uri| !uri.is_empty())
        .map(str::to_string);

    let shape = ListingShape::classify(body, category);
    if let ListingShape::Unrecognized { found } = &shape {
        tracing::warn!(
            category = category.as_str(),
            found = *found,
            err.code = ExErrorKind::UnexpectedShape.code(),
            "unrecognized listing shape, treating as empty"
        );
    }

    ListingPage {
        shape,
        continuation_uri,
    }
}
