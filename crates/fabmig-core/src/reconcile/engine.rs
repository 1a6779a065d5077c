use crate::collaborators::TargetMutator;
use crate::errors::{ExError, MutationError, MutationErrorKind, Result};
use crate::model::{Inventory, NameIndex, ObjectCategory, WorkspaceObject};
use crate::reconcile::plan::{plan, PlannedAction};
use crate::reconcile::report::{ObjectOutcome, ObjectReport, ReconcileReport};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// List and plan only; issue no create/update calls
    pub dry_run: bool,
}

/// Merge one category's source inventory into the target workspace
///
/// Every well-formed source object is attempted exactly once, as an update
/// when the target already has an object of the same name and as a create
/// otherwise. Malformed entries are skipped. A failing create/update is
/// logged and recorded in the report; the remaining objects are still
/// attempted.
///
/// # Errors
///
/// Fails only when the target listing fails with anything other than
/// not-found. No mutation is issued in that case.
#[allow(clippy::result_large_err)]
pub fn reconcile_category<M>(
    category: ObjectCategory,
    source: &Inventory,
    target: &M,
    options: ReconcileOptions,
) -> Result<ReconcileReport>
where
    M: TargetMutator + ?Sized,
{
    let existing = match target.list_objects(category) {
        Ok(inventory) => inventory,
        Err(err) => match err.kind {
            MutationErrorKind::NotFound => {
                info!(
                    category = category.as_str(),
                    "category not present on target, every object will be created"
                );
                Inventory::new()
            }
            MutationErrorKind::Conflict
            | MutationErrorKind::Transient
            | MutationErrorKind::Fatal => {
                return Err(ExError::from(err)
                    .with_op("list_target_objects")
                    .with_category(category.as_str()));
            }
        },
    };

    let index = NameIndex::build(&existing);
    for dup in index.duplicates() {
        warn!(
            category = category.as_str(),
            object_name = %dup.name,
            kept_id = %dup.kept_id,
            ignored_id = %dup.ignored_id,
            "duplicate name on target, updates go to the first listed object"
        );
    }

    let plan = plan(category, source, &index);
    debug!(
        category = category.as_str(),
        target_names = index.len(),
        creates = plan.creates(),
        updates = plan.updates(),
        skips = plan.skips(),
        "reconcile plan computed"
    );

    let mut report = ReconcileReport::new(category, options.dry_run, index.len());
    for action in plan.actions {
        report
            .objects
            .push(apply_action(category, target, action, options.dry_run));
    }
    Ok(report)
}

fn apply_action<M>(
    category: ObjectCategory,
    target: &M,
    action: PlannedAction,
    dry_run: bool,
) -> ObjectReport
where
    M: TargetMutator + ?Sized,
{
    match action {
        PlannedAction::Skip { index, reason } => {
            warn!(
                category = category.as_str(),
                object_index = index,
                reason = %reason,
                "skipping malformed source record"
            );
            ObjectReport {
                index,
                name: None,
                outcome: ObjectOutcome::Skipped { reason },
            }
        }
        PlannedAction::Create { index, object } => {
            let outcome = if dry_run {
                info!(
                    category = category.as_str(),
                    object_index = index,
                    object_name = object.name(),
                    "dry run: would create"
                );
                ObjectOutcome::WouldCreate
            } else {
                match target.create_object(category, &object) {
                    Ok(()) => {
                        info!(
                            category = category.as_str(),
                            object_index = index,
                            object_name = object.name(),
                            "created"
                        );
                        ObjectOutcome::Created
                    }
                    Err(err) => failed(category, index, &object, None, err),
                }
            };
            ObjectReport {
                index,
                name: Some(object.name().to_string()),
                outcome,
            }
        }
        PlannedAction::Update {
            index,
            target_id,
            object,
        } => {
            let outcome = if dry_run {
                info!(
                    category = category.as_str(),
                    object_index = index,
                    object_name = object.name(),
                    object_id = %target_id,
                    "dry run: would update"
                );
                ObjectOutcome::WouldUpdate { target_id }
            } else {
                match target.update_object(category, &target_id, &object) {
                    Ok(()) => {
                        info!(
                            category = category.as_str(),
                            object_index = index,
                            object_name = object.name(),
                            object_id = %target_id,
                            "updated"
                        );
                        ObjectOutcome::Updated { target_id }
                    }
                    Err(err) => failed(category, index, &object, Some(&target_id), err),
                }
            };
            ObjectReport {
                index,
                name: Some(object.name().to_string()),
                outcome,
            }
        }
    }
}

fn failed(
    category: ObjectCategory,
    index: usize,
    object: &WorkspaceObject,
    target_id: Option<&str>,
    err: MutationError,
) -> ObjectOutcome {
    let action = if target_id.is_some() { "update" } else { "create" };
    let hint = match err.kind {
        MutationErrorKind::NotFound => "target object or collection no longer exists",
        MutationErrorKind::Conflict => "target reports a conflicting object",
        MutationErrorKind::Transient => "transient failure, object state on target is unknown",
        MutationErrorKind::Fatal => "target refused the object",
    };
    let mut ex = ExError::from(err.clone())
        .with_op(format!("{}_object", action))
        .with_category(category.as_str())
        .with_object_name(object.name());
    if let Some(id) = target_id {
        ex = ex.with_object_id(id);
    }
    error!(
        category = category.as_str(),
        object_index = index,
        object_name = object.name(),
        object_id = ex.object_id().unwrap_or(""),
        action,
        err.kind = err.kind.as_str(),
        err.code = ex.code(),
        status = ?err.status,
        error = %ex,
        "{} failed: {}",
        action,
        hint
    );
    ObjectOutcome::Failed {
        kind: err.kind,
        status: err.status,
        message: err.message,
    }
}
