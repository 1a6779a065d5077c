use fabmig_core::{
    Inventory, MutationError, MutationErrorKind, ObjectCategory, TargetMutator, WorkspaceObject,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// A create/update call as seen by the fake target
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    Create {
        category: ObjectCategory,
        payload: Value,
    },
    Update {
        category: ObjectCategory,
        object_id: String,
        payload: Value,
    },
}

/// In-memory target workspace
///
/// Keeps a listing per category, records every mutation call, and assigns
/// ids `t-1`, `t-2`, ... to created objects so a second pass can see them.
#[derive(Default)]
pub struct FakeTarget {
    listings: RefCell<HashMap<ObjectCategory, Vec<Value>>>,
    list_failure: Option<MutationErrorKind>,
    fail_names: HashMap<String, MutationErrorKind>,
    calls: RefCell<Vec<Call>>,
    next_id: RefCell<u32>,
}

#[allow(dead_code)]
impl FakeTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target already holds `(name, id)` pairs in `category`
    pub fn with_existing(self, category: ObjectCategory, objects: &[(&str, &str)]) -> Self {
        let entries = objects
            .iter()
            .map(|(name, id)| json!({"name": name, "id": id}))
            .collect();
        self.with_listing(category, entries)
    }

    pub fn with_listing(self, category: ObjectCategory, entries: Vec<Value>) -> Self {
        self.listings.borrow_mut().insert(category, entries);
        self
    }

    /// Listing fails with `kind` for every category
    pub fn failing_list(mut self, kind: MutationErrorKind) -> Self {
        self.list_failure = Some(kind);
        self
    }

    /// Create/update of the object called `name` fails with `kind`
    pub fn failing_object(mut self, name: &str, kind: MutationErrorKind) -> Self {
        self.fail_names.insert(name.to_string(), kind);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .count()
    }

    pub fn updates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }

    fn check_failure(&self, payload: &WorkspaceObject) -> Result<(), MutationError> {
        match self.fail_names.get(payload.name()) {
            Some(kind) => Err(MutationError::new(*kind, format!("injected {}", kind))),
            None => Ok(()),
        }
    }
}

impl TargetMutator for FakeTarget {
    fn list_objects(&self, category: ObjectCategory) -> Result<Inventory, MutationError> {
        if let Some(kind) = self.list_failure {
            return Err(MutationError::new(kind, "injected listing failure"));
        }
        match self.listings.borrow().get(&category) {
            Some(entries) => Ok(Inventory::from(entries.clone())),
            None => Err(MutationError::from_status(404, "no such collection")),
        }
    }

    fn create_object(
        &self,
        category: ObjectCategory,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        self.calls.borrow_mut().push(Call::Create {
            category,
            payload: payload.to_value(),
        });
        self.check_failure(payload)?;

        let mut next = self.next_id.borrow_mut();
        *next += 1;
        let mut stored = payload.payload().clone();
        stored.insert("id".to_string(), json!(format!("t-{}", *next)));
        self.listings
            .borrow_mut()
            .entry(category)
            .or_default()
            .push(Value::Object(stored));
        Ok(())
    }

    fn update_object(
        &self,
        category: ObjectCategory,
        object_id: &str,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        self.calls.borrow_mut().push(Call::Update {
            category,
            object_id: object_id.to_string(),
            payload: payload.to_value(),
        });
        self.check_failure(payload)
    }
}

/// Source inventory of well-formed records named after `names`
#[allow(dead_code)]
pub fn source_of(names: &[&str]) -> Inventory {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"name": name, "id": format!("s{}", i + 1)}))
        .collect()
}
