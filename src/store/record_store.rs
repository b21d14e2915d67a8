//! In-memory ordered record store for one session.
//!
//! The store keeps records in display order: manually logged updates go to
//! the front, merged (imported) records are appended in source order. Every
//! mutation preserves id uniqueness.

use crate::domain::Record;
use crate::error::{Result, TrackerError};
use log::debug;
use std::collections::HashSet;

/// Counts reported by [`RecordStore::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Records appended to the store
    pub inserted: usize,
    /// Records dropped because their id was already present
    pub skipped: usize,
}

/// The session's ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at the front.
    ///
    /// Fails with `DuplicateId` if a record with the same id already exists.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.contains_id(&record.id) {
            return Err(TrackerError::DuplicateId(record.id));
        }
        debug!("Adding record {}", record.id);
        self.records.insert(0, record);
        Ok(())
    }

    /// Append every record whose id is not present yet.
    ///
    /// Duplicates against the store and within `records` are dropped and
    /// counted; the first occurrence of an id wins.
    pub fn merge(&mut self, records: Vec<Record>) -> MergeOutcome {
        let mut seen: HashSet<String> = self.records.iter().map(|r| r.id.clone()).collect();
        let mut outcome = MergeOutcome::default();

        for record in records {
            if seen.insert(record.id.clone()) {
                self.records.push(record);
                outcome.inserted += 1;
            } else {
                debug!("Skipping duplicate record {}", record.id);
                outcome.skipped += 1;
            }
        }

        outcome
    }

    /// Replace the whole collection.
    ///
    /// Rejects a collection containing a repeated id and leaves the store as it was.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        let duplicate = {
            let mut seen = HashSet::with_capacity(records.len());
            records
                .iter()
                .find(|r| !seen.insert(r.id.as_str()))
                .map(|r| r.id.clone())
        };
        if let Some(id) = duplicate {
            return Err(TrackerError::DuplicateId(id));
        }
        debug!("Replacing store contents with {} records", records.len());
        self.records = records;
        Ok(())
    }

    /// Read-only view of the records in display order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Drop every record (session reset).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use chrono::NaiveDate;

    fn record(id: &str) -> Record {
        Record::new(
            id,
            "Software Update",
            format!("work on {}", id),
            Priority::Medium,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.all().iter().map(|r| r.id.as_str()).collect()
    }

    fn assert_unique(store: &RecordStore) {
        let unique: HashSet<_> = store.all().iter().map(|r| &r.id).collect();
        assert_eq!(unique.len(), store.len(), "ids should be unique");
    }

    #[test]
    fn test_add_prepends() {
        let mut store = RecordStore::new();
        store.add(record("UPDATE-1001")).unwrap();
        store.add(record("UPDATE-1002")).unwrap();
        assert_eq!(ids(&store), vec!["UPDATE-1002", "UPDATE-1001"]);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut store = RecordStore::new();
        store.add(record("UPDATE-1001")).unwrap();
        let err = store.add(record("UPDATE-1001")).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateId(id) if id == "UPDATE-1001"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut store = RecordStore::new();
        store.add(record("UPDATE-1")).unwrap();
        let outcome = store.merge(vec![record("UPDATE-2"), record("UPDATE-3")]);
        assert_eq!(outcome, MergeOutcome { inserted: 2, skipped: 0 });
        assert_eq!(ids(&store), vec!["UPDATE-1", "UPDATE-2", "UPDATE-3"]);
    }

    #[test]
    fn test_merge_skips_existing_ids() {
        let mut store = RecordStore::new();
        store.merge(vec![record("A"), record("B"), record("C")]);

        let outcome = store.merge(vec![record("B"), record("D"), record("C"), record("E")]);
        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(store.len(), 3 + (4 - 2));
        assert_eq!(ids(&store), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_merge_skips_duplicates_within_batch() {
        let mut store = RecordStore::new();
        let mut second = record("X");
        second.update = "second copy".to_string();

        let outcome = store.merge(vec![record("X"), second]);
        assert_eq!(outcome, MergeOutcome { inserted: 1, skipped: 1 });
        assert_eq!(store.get("X").unwrap().update, "work on X");
    }

    #[test]
    fn test_merge_sequences_keep_ids_unique() {
        let mut store = RecordStore::new();
        let batches = [
            vec!["A", "B", "A"],
            vec!["B", "C"],
            vec!["C", "D", "D", "A"],
            vec![],
            vec!["E", "B"],
        ];
        for batch in batches {
            store.merge(batch.into_iter().map(record).collect());
            assert_unique(&store);
        }
        assert_eq!(ids(&store), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_replace_all() {
        let mut store = RecordStore::new();
        store.add(record("OLD")).unwrap();
        store.replace_all(vec![record("N1"), record("N2")]).unwrap();
        assert_eq!(ids(&store), vec!["N1", "N2"]);
    }

    #[test]
    fn test_replace_all_rejects_duplicates() {
        let mut store = RecordStore::new();
        store.add(record("KEEP")).unwrap();
        let before = store.clone();

        let result = store.replace_all(vec![record("N1"), record("N1")]);
        assert!(matches!(result, Err(TrackerError::DuplicateId(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn test_lookup_and_clear() {
        let mut store = RecordStore::new();
        store.add(record("UPDATE-1001")).unwrap();
        assert!(store.contains_id("UPDATE-1001"));
        assert!(store.get("UPDATE-9999").is_none());

        store.clear();
        assert!(store.is_empty());
    }
}
