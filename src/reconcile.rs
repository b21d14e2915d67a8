//! Edit reconciliation for table snapshots.
//!
//! The editable table hands back a full snapshot: one row per record, in
//! display order. Only `update`, `status` and `priority` may change. Edits to
//! `category` or `date_logged` are discarded and the stored values kept.
//! A snapshot with the wrong number of rows, a row carrying an id the store
//! has never seen, or a known id moved to another row is rejected as a whole.

use crate::domain::Record;
use crate::error::{Result, SnapshotError};
use crate::store::RecordStore;
use log::{debug, info, warn};
use std::collections::HashSet;

/// What happened to the store after reconciling a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing editable differed; the store was not touched
    Unchanged { discarded_fixed_edits: usize },
    /// The store was overwritten; statistics must be re-derived
    Changed {
        rows_changed: usize,
        discarded_fixed_edits: usize,
    },
}

impl Reconciliation {
    pub fn is_changed(&self) -> bool {
        matches!(self, Reconciliation::Changed { .. })
    }

    /// Rows where a read-only column was edited and the edit thrown away.
    pub fn discarded_fixed_edits(&self) -> usize {
        match self {
            Reconciliation::Unchanged { discarded_fixed_edits }
            | Reconciliation::Changed { discarded_fixed_edits, .. } => *discarded_fixed_edits,
        }
    }
}

/// Check a snapshot's shape against the store.
fn validate(current: &[Record], snapshot: &[Record]) -> std::result::Result<(), SnapshotError> {
    if snapshot.len() != current.len() {
        return Err(SnapshotError::RowCount {
            expected: current.len(),
            actual: snapshot.len(),
        });
    }

    let known: HashSet<&str> = current.iter().map(|r| r.id.as_str()).collect();
    if let Some((idx, row)) = snapshot.iter().enumerate().find(|(_, r)| !known.contains(r.id.as_str())) {
        return Err(SnapshotError::UnknownId {
            row: idx + 1,
            id: row.id.clone(),
        });
    }

    // Rows are aligned by position; a known id elsewhere means the rows were reordered
    if let Some((idx, row)) = snapshot
        .iter()
        .zip(current)
        .enumerate()
        .find_map(|(idx, (row, cur))| (row.id != cur.id).then_some((idx, row)))
    {
        return Err(SnapshotError::Misplaced {
            row: idx + 1,
            id: row.id.clone(),
        });
    }

    Ok(())
}

/// Reconcile an edited snapshot against the store.
///
/// Overwrites the store only when at least one editable field differs.
pub fn reconcile(store: &mut RecordStore, snapshot: Vec<Record>) -> Result<Reconciliation> {
    validate(store.all(), &snapshot)?;

    let mut rows_changed = 0;
    let mut discarded_fixed_edits = 0;
    let mut reconciled = Vec::with_capacity(snapshot.len());

    for (current, row) in store.all().iter().zip(snapshot) {
        if row.fixed_fields_differ(current) {
            warn!("Discarding edit to read-only column(s) of {}", current.id);
            discarded_fixed_edits += 1;
        }

        let merged = Record {
            id: current.id.clone(),
            category: current.category.clone(),
            date_logged: current.date_logged,
            update: row.update,
            status: row.status,
            priority: row.priority,
        };
        if merged.editable_fields_differ(current) {
            debug!("Row {} edited", current.id);
            rows_changed += 1;
        }
        reconciled.push(merged);
    }

    if rows_changed == 0 {
        return Ok(Reconciliation::Unchanged { discarded_fixed_edits });
    }

    store.replace_all(reconciled)?;
    info!("Applied snapshot: {} rows changed", rows_changed);
    Ok(Reconciliation::Changed {
        rows_changed,
        discarded_fixed_edits,
    })
}
