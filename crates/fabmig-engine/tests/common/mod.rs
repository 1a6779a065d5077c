//! In-memory collaborators for driver tests

#![allow(dead_code)]

use fabmig_core::errors::{ExError, ExErrorKind};
use fabmig_core::{
    Inventory, MutationError, MutationErrorKind, ObjectCategory, ObjectSource, TargetMutator,
    WorkspaceObject,
};
use fabmig_engine::session::WorkspaceSessions;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct SourceState {
    listings: HashMap<ObjectCategory, Vec<Value>>,
    failing: HashMap<ObjectCategory, ExErrorKind>,
    listed: Vec<ObjectCategory>,
}

/// Source workspace; clones share state
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Rc<RefCell<SourceState>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, category: ObjectCategory, entries: Vec<Value>) -> Self {
        self.state.borrow_mut().listings.insert(category, entries);
        self
    }

    pub fn failing(self, category: ObjectCategory, kind: ExErrorKind) -> Self {
        self.state.borrow_mut().failing.insert(category, kind);
        self
    }

    pub fn listed(&self) -> Vec<ObjectCategory> {
        self.state.borrow().listed.clone()
    }
}

impl ObjectSource for FakeSource {
    fn list_inventory(&self, category: ObjectCategory) -> Result<Inventory, ExError> {
        let mut state = self.state.borrow_mut();
        state.listed.push(category);
        if let Some(kind) = state.failing.get(&category) {
            return Err(ExError::new(*kind)
                .with_op("list_inventory")
                .with_category(category.as_str())
                .with_message("scripted source failure"));
        }
        Ok(Inventory::from(
            state.listings.get(&category).cloned().unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
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

#[derive(Default)]
struct TargetState {
    objects: HashMap<ObjectCategory, Vec<Value>>,
    failing_lists: HashMap<ObjectCategory, MutationErrorKind>,
    calls: Vec<Call>,
    next_id: usize,
}

/// Target workspace; clones share state
#[derive(Clone, Default)]
pub struct FakeTarget {
    state: Rc<RefCell<TargetState>>,
}

impl FakeTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, category: ObjectCategory, pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(name, id)| json!({"name": name, "id": id}))
            .collect();
        self.state.borrow_mut().objects.insert(category, entries);
        self
    }

    pub fn failing_list(self, category: ObjectCategory, kind: MutationErrorKind) -> Self {
        self.state.borrow_mut().failing_lists.insert(category, kind);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }
}

impl TargetMutator for FakeTarget {
    fn list_objects(&self, category: ObjectCategory) -> Result<Inventory, MutationError> {
        let state = self.state.borrow();
        if let Some(kind) = state.failing_lists.get(&category) {
            return Err(MutationError::new(*kind, "scripted listing failure"));
        }
        match state.objects.get(&category) {
            Some(entries) => Ok(Inventory::from(entries.clone())),
            None => Err(MutationError::from_status(404, "no such collection")),
        }
    }

    fn create_object(
        &self,
        category: ObjectCategory,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Create {
            category,
            payload: payload.to_value(),
        });
        state.next_id += 1;
        let id = format!("t-{}", state.next_id);
        state
            .objects
            .entry(category)
            .or_default()
            .push(json!({"name": payload.name(), "id": id}));
        Ok(())
    }

    fn update_object(
        &self,
        category: ObjectCategory,
        object_id: &str,
        payload: &WorkspaceObject,
    ) -> Result<(), MutationError> {
        self.state.borrow_mut().calls.push(Call::Update {
            category,
            object_id: object_id.to_string(),
            payload: payload.to_value(),
        });
        Ok(())
    }
}

/// Opens the fakes; either side can be made to fail authentication
pub struct FakeSessions {
    pub source: FakeSource,
    pub target: FakeTarget,
    pub reject_source: bool,
    pub reject_target: bool,
    pub opened: RefCell<Vec<&'static str>>,
}

impl FakeSessions {
    pub fn new(source: FakeSource, target: FakeTarget) -> Self {
        Self {
            source,
            target,
            reject_source: false,
            reject_target: false,
            opened: RefCell::new(Vec::new()),
        }
    }

    fn rejected(side: &str) -> ExError {
        ExError::new(ExErrorKind::Authentication)
            .with_op("acquire_token")
            .with_message(format!("{} credentials rejected", side))
    }
}

impl WorkspaceSessions for FakeSessions {
    fn open_source(&self) -> Result<Box<dyn ObjectSource>, ExError> {
        if self.reject_source {
            return Err(Self::rejected("source"));
        }
        self.opened.borrow_mut().push("source");
        Ok(Box::new(self.source.clone()))
    }

    fn open_target(&self) -> Result<Box<dyn TargetMutator>, ExError> {
        if self.reject_target {
            return Err(Self::rejected("target"));
        }
        self.opened.borrow_mut().push("target");
        Ok(Box::new(self.target.clone()))
    }
}
