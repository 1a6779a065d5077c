use crate::errors::RecordError;
use crate::model::{Inventory, NameIndex, ObjectCategory, WorkspaceObject};

/// What the pass will do with one source entry
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedAction {
    Create {
        index: usize,
        object: WorkspaceObject,
    },
    Update {
        index: usize,
        target_id: String,
        object: WorkspaceObject,
    },
    Skip {
        index: usize,
        reason: RecordError,
    },
}

impl PlannedAction {
    /// Position of the entry in the source inventory
    pub fn index(&self) -> usize {
        match self {
            PlannedAction::Create { index, .. }
            | PlannedAction::Update { index, .. }
            | PlannedAction::Skip { index, .. } => *index,
        }
    }
}

/// Ordered actions for one category, one per source entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan {
    pub category: ObjectCategory,
    pub actions: Vec<PlannedAction>,
}

impl ReconcilePlan {
    pub fn creates(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Create { .. }))
    }

    pub fn updates(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Update { .. }))
    }

    pub fn skips(&self) -> usize {
        self.count(|a| matches!(a, PlannedAction::Skip { .. }))
    }

    fn count(&self, pred: impl Fn(&PlannedAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }
}

/// Classify every source entry against the target's name index
pub fn plan(category: ObjectCategory, source: &Inventory, index: &NameIndex) -> ReconcilePlan {
    let actions = source
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| match WorkspaceObject::from_value(entry) {
            Err(reason) => PlannedAction::Skip { index: i, reason },
            Ok(object) => match index.get(object.name()) {
                Some(target_id) => PlannedAction::Update {
                    index: i,
                    target_id: target_id.to_string(),
                    object,
                },
                None => PlannedAction::Create { index: i, object },
            },
        })
        .collect();

    ReconcilePlan { category, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_by_name_not_by_source_id() {
        let source = Inventory::from(vec![
            json!({"name": "Sales", "id": "s1"}),
            json!({"name": "HR", "id": "s2"}),
        ]);
        let index: NameIndex = [("Sales", "t1")].into_iter().collect();

        let plan = plan(ObjectCategory::Datasets, &source, &index);

        assert_eq!(plan.actions.len(), 2);
        match &plan.actions[0] {
            PlannedAction::Update {
                index,
                target_id,
                object,
            } => {
                assert_eq!(*index, 0);
                assert_eq!(target_id, "t1");
                assert_eq!(object.to_value(), json!({"name": "Sales", "id": "s1"}));
            }
            other => panic!("expected update, got {:?}", other),
        }
        match &plan.actions[1] {
            PlannedAction::Create { index, object } => {
                assert_eq!(*index, 1);
                assert_eq!(object.to_value(), json!({"name": "HR", "id": "s2"}));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped_in_place() {
        let source = Inventory::from(vec![
            json!({"name": "A"}),
            json!(17),
            json!({"id": "no-name"}),
            json!({"name": "B"}),
        ]);
        let plan = plan(ObjectCategory::Reports, &source, &NameIndex::default());

        assert_eq!(plan.creates(), 2);
        assert_eq!(plan.skips(), 2);
        assert_eq!(plan.updates(), 0);
        let skipped: Vec<usize> = plan
            .actions
            .iter()
            .filter(|a| matches!(a, PlannedAction::Skip { .. }))
            .map(PlannedAction::index)
            .collect();
        assert_eq!(skipped, vec![1, 2]);
    }

    #[test]
    fn test_empty_source_yields_empty_plan() {
        let index: NameIndex = [("Sales", "t1")].into_iter().collect();
        let plan = plan(ObjectCategory::Lakehouses, &Inventory::new(), &index);
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn test_repeated_source_name_updates_same_target_twice() {
        let source = Inventory::from(vec![json!({"name": "X", "v": 1}), json!({"name": "X", "v": 2})]);
        let index: NameIndex = [("X", "t-x")].into_iter().collect();
        let plan = plan(ObjectCategory::Dataflows, &source, &index);
        assert_eq!(plan.updates(), 2);
    }
}
