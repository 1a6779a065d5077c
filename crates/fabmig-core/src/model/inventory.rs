use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered entries of one category, as fetched or loaded from a snapshot
///
/// Entries stay raw JSON: a source inventory may legitimately contain
/// malformed entries, which the reconciliation pass skips one by one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: Vec<Value>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Value> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: Value) {
        self.entries.push(entry);
    }

    /// Append another page, keeping pagination order
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Value>) {
        self.entries.extend(entries);
    }
}

impl From<Vec<Value>> for Inventory {
    fn from(entries: Vec<Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Value> for Inventory {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
