#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{source_of, Call, FakeTarget};
use fabmig_core::errors::ExErrorKind;
use fabmig_core::reconcile::ObjectOutcome;
use fabmig_core::{
    reconcile_category, Inventory, MutationErrorKind, ObjectCategory, ReconcileOptions,
};
use serde_json::json;

const LIVE: ReconcileOptions = ReconcileOptions { dry_run: false };

#[test]
fn test_sales_and_hr_example() {
    // Given: source [Sales(s1), HR(s2)], target already has Sales as t1
    let source = Inventory::from(vec![
        json!({"name": "Sales", "id": "s1"}),
        json!({"name": "HR", "id": "s2"}),
    ]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Datasets, &[("Sales", "t1")]);

    // When
    let report = reconcile_category(ObjectCategory::Datasets, &source, &target, LIVE).unwrap();

    // Then: Sales is updated in place, HR is created, payloads are the source records
    assert_eq!(
        target.calls(),
        vec![
            Call::Update {
                category: ObjectCategory::Datasets,
                object_id: "t1".to_string(),
                payload: json!({"name": "Sales", "id": "s1"}),
            },
            Call::Create {
                category: ObjectCategory::Datasets,
                payload: json!({"name": "HR", "id": "s2"}),
            },
        ]
    );
    assert_eq!(report.updated(), 1);
    assert_eq!(report.created(), 1);
}

#[test]
fn test_all_new_names_are_created() {
    let source = source_of(&["A", "B", "C"]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Reports, &[("Z", "t-z")]);

    let report = reconcile_category(ObjectCategory::Reports, &source, &target, LIVE).unwrap();

    assert_eq!(target.creates(), 3);
    assert_eq!(target.updates(), 0);
    assert_eq!(report.created(), 3);
}

#[test]
fn test_all_known_names_are_updated_at_indexed_ids() {
    let source = source_of(&["A", "B"]);
    let target = FakeTarget::new()
        .with_existing(ObjectCategory::Dashboards, &[("B", "id-b"), ("A", "id-a")]);

    reconcile_category(ObjectCategory::Dashboards, &source, &target, LIVE).unwrap();

    assert_eq!(target.creates(), 0);
    let ids: Vec<String> = target
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Update { object_id, .. } => object_id,
            Call::Create { .. } => panic!("unexpected create"),
        })
        .collect();
    assert_eq!(ids, vec!["id-a".to_string(), "id-b".to_string()]);
}

#[test]
fn test_payload_is_full_source_record() {
    let record = json!({
        "name": "Orders",
        "id": "src-9",
        "description": "daily orders",
        "definition": {"parts": [{"path": "model.bim", "payload": "e30=", "payloadType": "InlineBase64"}]}
    });
    let source = Inventory::from(vec![record.clone()]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Datasets, &[("Orders", "t-o")]);

    reconcile_category(ObjectCategory::Datasets, &source, &target, LIVE).unwrap();

    match &target.calls()[0] {
        Call::Update { payload, .. } => assert_eq!(payload, &record),
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_malformed_records_are_never_submitted() {
    // 3 valid, 3 malformed
    let source = Inventory::from(vec![
        json!({"name": "A"}),
        json!("just a string"),
        json!({"name": "B"}),
        json!({"id": "nameless"}),
        json!({"name": null}),
        json!({"name": "C"}),
    ]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Pipelines, &[]);

    let report = reconcile_category(ObjectCategory::Pipelines, &source, &target, LIVE).unwrap();

    assert_eq!(target.calls().len(), 3);
    assert_eq!(report.skipped(), 3);
    assert_eq!(report.objects.len(), 6);
    let skipped: Vec<usize> = report
        .objects
        .iter()
        .filter(|o| matches!(o.outcome, ObjectOutcome::Skipped { .. }))
        .map(|o| o.index)
        .collect();
    assert_eq!(skipped, vec![1, 3, 4]);
}

#[test]
fn test_failure_of_second_object_does_not_stop_the_third() {
    let source = source_of(&["first", "second", "third"]);
    let target = FakeTarget::new()
        .with_existing(ObjectCategory::Lakehouses, &[])
        .failing_object("second", MutationErrorKind::Transient);

    let report = reconcile_category(ObjectCategory::Lakehouses, &source, &target, LIVE).unwrap();

    let names: Vec<String> = target
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Create { payload, .. } => payload["name"].as_str().unwrap().to_string(),
            Call::Update { .. } => panic!("unexpected update"),
        })
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(report.created(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.objects[1].outcome,
        ObjectOutcome::Failed {
            kind: MutationErrorKind::Transient,
            ..
        }
    ));
}

#[test]
fn test_every_failure_kind_is_recorded_and_passed_over() {
    let source = source_of(&["nf", "conflict", "transient", "fatal", "ok"]);
    let target = FakeTarget::new()
        .with_existing(
            ObjectCategory::Dataflows,
            &[("nf", "t-nf"), ("conflict", "t-c")],
        )
        .failing_object("nf", MutationErrorKind::NotFound)
        .failing_object("conflict", MutationErrorKind::Conflict)
        .failing_object("transient", MutationErrorKind::Transient)
        .failing_object("fatal", MutationErrorKind::Fatal);

    let report = reconcile_category(ObjectCategory::Dataflows, &source, &target, LIVE).unwrap();

    assert_eq!(target.calls().len(), 5);
    assert_eq!(report.failed(), 4);
    assert_eq!(report.created(), 1);
    let kinds: Vec<MutationErrorKind> = report
        .failures()
        .map(|o| match &o.outcome {
            ObjectOutcome::Failed { kind, .. } => *kind,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            MutationErrorKind::NotFound,
            MutationErrorKind::Conflict,
            MutationErrorKind::Transient,
            MutationErrorKind::Fatal
        ]
    );
}

#[test]
fn test_missing_target_category_means_all_creates() {
    // No listing registered: the fake answers 404
    let source = source_of(&["Sales", "HR"]);
    let target = FakeTarget::new();

    let report =
        reconcile_category(ObjectCategory::DataWarehouses, &source, &target, LIVE).unwrap();

    assert_eq!(report.target_names, 0);
    assert_eq!(target.creates(), 2);
    assert_eq!(target.updates(), 0);
}

#[test]
fn test_listing_failure_aborts_category_without_mutations() {
    let source = source_of(&["Sales"]);
    let target = FakeTarget::new().failing_list(MutationErrorKind::Transient);

    let err = reconcile_category(ObjectCategory::Reports, &source, &target, LIVE).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Transient);
    assert_eq!(err.category(), Some("reports"));
    assert!(target.calls().is_empty());
}

#[test]
fn test_duplicate_target_names_update_first_listed() {
    let source = source_of(&["Sales"]);
    let target = FakeTarget::new().with_existing(
        ObjectCategory::Datasets,
        &[("Sales", "first"), ("Sales", "second")],
    );

    reconcile_category(ObjectCategory::Datasets, &source, &target, LIVE).unwrap();

    match &target.calls()[0] {
        Call::Update { object_id, .. } => assert_eq!(object_id, "first"),
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_target_entries_without_id_cannot_be_matched() {
    let source = source_of(&["Sales"]);
    let target = FakeTarget::new()
        .with_listing(ObjectCategory::Datasets, vec![json!({"name": "Sales"})]);

    reconcile_category(ObjectCategory::Datasets, &source, &target, LIVE).unwrap();

    assert_eq!(target.creates(), 1);
}

#[test]
fn test_second_run_updates_what_first_run_created() {
    let source = source_of(&["A", "B", "C"]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Reports, &[("A", "t-a")]);

    let first = reconcile_category(ObjectCategory::Reports, &source, &target, LIVE).unwrap();
    assert_eq!(first.created(), 2);
    assert_eq!(first.updated(), 1);

    target.clear_calls();
    let second = reconcile_category(ObjectCategory::Reports, &source, &target, LIVE).unwrap();

    assert_eq!(second.created(), 0);
    assert_eq!(second.updated(), 3);
    assert_eq!(target.creates(), 0);
    let ids: Vec<String> = target
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Update { object_id, .. } => Some(object_id),
            Call::Create { .. } => None,
        })
        .collect();
    assert_eq!(ids, vec!["t-a", "t-1", "t-2"]);
}

#[test]
fn test_dry_run_issues_no_mutations() {
    let source = source_of(&["Sales", "HR"]);
    let target = FakeTarget::new().with_existing(ObjectCategory::Datasets, &[("Sales", "t1")]);

    let report = reconcile_category(
        ObjectCategory::Datasets,
        &source,
        &target,
        ReconcileOptions { dry_run: true },
    )
    .unwrap();

    assert!(target.calls().is_empty());
    assert!(report.dry_run);
    assert_eq!(report.would_update(), 1);
    assert_eq!(report.would_create(), 1);
    assert_eq!(
        report.objects[0].outcome,
        ObjectOutcome::WouldUpdate {
            target_id: "t1".to_string()
        }
    );
}

#[test]
fn test_empty_source_touches_nothing() {
    let target = FakeTarget::new().with_existing(ObjectCategory::Reports, &[("A", "t-a")]);
    let report =
        reconcile_category(ObjectCategory::Reports, &Inventory::new(), &target, LIVE).unwrap();
    assert!(report.objects.is_empty());
    assert!(target.calls().is_empty());
}
