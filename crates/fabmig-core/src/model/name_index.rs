use crate::model::Inventory;
use serde_json::Value;
use std::collections::HashMap;

/// A target name seen again after it was already indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    /// Id kept in the index (first in listing order)
    pub kept_id: String,
    pub ignored_id: String,
}

/// Lookup from object name to target-assigned id for one category
///
/// Built fresh from the target listing before every pass and never
/// persisted. When a name appears more than once the first occurrence in
/// listing order wins.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    ids: HashMap<String, String>,
    duplicates: Vec<DuplicateName>,
}

impl NameIndex {
    /// Index every target entry that has both a string `name` and a string `id`
    ///
    /// Entries lacking either are skipped: they cannot be matched by name.
    pub fn build(target: &Inventory) -> Self {
        let mut index = NameIndex::default();
        for entry in target.entries() {
            let (Some(name), Some(id)) = (
                entry.get("name").and_then(Value::as_str),
                entry.get("id").and_then(Value::as_str),
            ) else {
                continue;
            };
            match index.ids.get(name) {
                Some(kept) => index.duplicates.push(DuplicateName {
                    name: name.to_string(),
                    kept_id: kept.clone(),
                    ignored_id: id.to_string(),
                }),
                None => {
                    index.ids.insert(name.to_string(), id.to_string());
                }
            }
        }
        index
    }

    /// Target id for `name`, if the target already has such an object
    pub fn get(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateName] {
        &self.duplicates
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = NameIndex::default();
        for (name, id) in iter {
            index.ids.entry(name.into()).or_insert_with(|| id.into());
        }
        index
    }
}
