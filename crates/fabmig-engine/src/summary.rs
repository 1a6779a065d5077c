//! End-of-run summary

use fabmig_core::errors::ExError;
use fabmig_core::{ObjectCategory, ReconcileReport};
use fabmig_core_types::RunId;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Reconcile,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Fetch => "fetch",
            Phase::Reconcile => "reconcile",
        }
    }
}

/// What happened to one category in one phase
#[derive(Debug, Clone)]
pub enum CategoryOutcome {
    Fetched { entries: usize, path: PathBuf },
    Reconciled(ReconcileReport),
    /// No snapshot on disk; the category was not reconciled
    NoSnapshot,
    /// Category-level failure; the run continued with the next category
    Failed(ExError),
}

#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub category: ObjectCategory,
    pub phase: Phase,
    pub outcome: CategoryOutcome,
}

/// Every category outcome of a run, in processing order
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: RunId,
    pub records: Vec<CategoryRecord>,
}

impl RunSummary {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, category: ObjectCategory, phase: Phase, outcome: CategoryOutcome) {
        self.records.push(CategoryRecord {
            category,
            phase,
            outcome,
        });
    }

    pub fn reports(&self) -> impl Iterator<Item = &ReconcileReport> {
        self.records.iter().filter_map(|r| match &r.outcome {
            CategoryOutcome::Reconciled(report) => Some(report),
            _ => None,
        })
    }

    pub fn category_errors(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, CategoryOutcome::Failed(_)))
    }

    /// Categories whose fetch succeeded, in processing order
    pub fn fetched_categories(&self) -> Vec<ObjectCategory> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, CategoryOutcome::Fetched { .. }))
            .map(|r| r.category)
            .collect()
    }

    pub fn fetched(&self) -> usize {
        self.records
            .iter()
            .map(|r| match r.outcome {
                CategoryOutcome::Fetched { entries, .. } => entries,
                _ => 0,
            })
            .sum()
    }

    pub fn created(&self) -> usize {
        self.reports().map(ReconcileReport::created).sum()
    }

    pub fn updated(&self) -> usize {
        self.reports().map(ReconcileReport::updated).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports().map(ReconcileReport::skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.reports().map(ReconcileReport::failed).sum()
    }

    /// Any object-level or category-level failure
    pub fn has_errors(&self) -> bool {
        self.failed() > 0 || self.category_errors().next().is_some()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run {}", self.run_id)?;
        for record in &self.records {
            write!(
                f,
                "  {:<9} {:<16} ",
                record.phase.as_str(),
                record.category.as_str()
            )?;
            match &record.outcome {
                CategoryOutcome::Fetched { entries, path } => {
                    writeln!(f, "{} entries -> {}", entries, path.display())?
                }
                CategoryOutcome::Reconciled(report) if report.dry_run => writeln!(
                    f,
                    "would create {}, would update {}, skipped {}",
                    report.would_create(),
                    report.would_update(),
                    report.skipped()
                )?,
                CategoryOutcome::Reconciled(report) => writeln!(
                    f,
                    "created {}, updated {}, skipped {}, failed {}",
                    report.created(),
                    report.updated(),
                    report.skipped(),
                    report.failed()
                )?,
                CategoryOutcome::NoSnapshot => writeln!(f, "no snapshot")?,
                CategoryOutcome::Failed(err) => writeln!(f, "error: {}", err)?,
            }
        }
        write!(
            f,
            "totals: created {}, updated {}, skipped {}, failed {}, category errors {}",
            self.created(),
            self.updated(),
            self.skipped(),
            self.failed(),
            self.category_errors().count()
        )
    }
}
