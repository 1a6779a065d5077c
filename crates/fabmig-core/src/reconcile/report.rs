use crate::errors::{MutationErrorKind, RecordError};
use crate::model::ObjectCategory;

/// Result of reconciling one source entry
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectOutcome {
    Created,
    Updated { target_id: String },
    /// Dry run: would have been created
    WouldCreate,
    /// Dry run: would have updated `target_id`
    WouldUpdate { target_id: String },
    Skipped { reason: RecordError },
    Failed {
        kind: MutationErrorKind,
        status: Option<u16>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectReport {
    pub index: usize,
    /// `None` for entries skipped before a name could be read
    pub name: Option<String>,
    pub outcome: ObjectOutcome,
}

/// Per-object outcomes of one reconciliation pass, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport {
    pub category: ObjectCategory,
    pub dry_run: bool,
    /// Distinct names found on the target before the pass
    pub target_names: usize,
    pub objects: Vec<ObjectReport>,
}

impl ReconcileReport {
    pub fn new(category: ObjectCategory, dry_run: bool, target_names: usize) -> Self {
        Self {
            category,
            dry_run,
            target_names,
            objects: Vec::new(),
        }
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Created))
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Updated { .. }))
    }

    pub fn would_create(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::WouldCreate))
    }

    pub fn would_update(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::WouldUpdate { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Failed { .. }))
    }

    /// Number of create/update calls issued against the target
    pub fn attempted(&self) -> usize {
        self.created() + self.updated() + self.failed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ObjectReport> {
        self.objects
            .iter()
            .filter(|o| matches!(o.outcome, ObjectOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ObjectOutcome) -> bool) -> usize {
        self.objects.iter().filter(|o| pred(&o.outcome)).count()
    }
}
