//! Record storage for opstrack.
//!
//! The store lives only in memory for the duration of a session. It is owned
//! by [`crate::session::Session`] and mutated by the form, the CSV importer
//! and the edit reconciler.
//!
//! # Example
//!
//! ```
//! use opstrack::store::RecordStore;
//! use opstrack::domain::{Priority, Record};
//! use chrono::NaiveDate;
//!
//! let mut store = RecordStore::new();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! store.add(Record::new("UPDATE-1001", "App Update", "Release 1.2", Priority::High, date))?;
//!
//! let outcome = store.merge(vec![Record::new("UPDATE-1001", "App Update", "dup", Priority::Low, date)]);
//! assert_eq!(outcome.skipped, 1);
//! # Ok::<(), opstrack::TrackerError>(())
//! ```

mod record_store;

pub use record_store::{MergeOutcome, RecordStore};
