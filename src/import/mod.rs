//! CSV import and export.
//!
//! Import is atomic: the whole table is parsed before the store is touched,
//! so any schema, format or read failure leaves the store exactly as it was.
//! Into an empty store the parsed rows become the store contents; otherwise
//! rows whose id already exists are counted as duplicates and dropped.

pub mod table;

use crate::domain::Record;
use crate::error::{Result, TrackerError};
use crate::store::RecordStore;
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

pub use table::{COLUMNS, parse_records, write_records};

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows added to the store
    pub imported: usize,
    /// Rows dropped because their id was already in use
    pub duplicates: usize,
    /// The store was empty, so the file became its whole contents
    pub replaced_empty_store: bool,
}

impl ImportReport {
    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        if self.replaced_empty_store {
            let loaded = format!("Successfully uploaded and loaded {} updates from the CSV!", self.imported);
            if self.duplicates > 0 {
                format!("{} ({} duplicates skipped)", loaded, self.duplicates)
            } else {
                loaded
            }
        } else if self.duplicates > 0 {
            format!(
                "Successfully imported {} new updates ({} duplicates skipped).",
                self.imported, self.duplicates
            )
        } else {
            format!("Successfully imported {} new updates.", self.imported)
        }
    }

    /// Whether the store changed and the display needs refreshing.
    pub fn changed_store(&self) -> bool {
        self.imported > 0
    }
}

/// Parse a CSV table from `reader` and merge it into `store`.
pub fn import_into<R: Read>(store: &mut RecordStore, reader: R) -> Result<ImportReport> {
    let records = parse_records(reader)?;
    let rows = records.len();
    let was_empty = store.is_empty();

    let outcome = store.merge(records);
    if outcome.skipped > 0 {
        warn!("Import skipped {} duplicate rows of {}", outcome.skipped, rows);
    }
    info!(
        "Imported {} rows into {} store",
        outcome.inserted,
        if was_empty { "empty" } else { "existing" }
    );

    Ok(ImportReport {
        imported: outcome.inserted,
        duplicates: outcome.skipped,
        replaced_empty_store: was_empty,
    })
}

/// Import a CSV file from disk.
pub fn import_file(store: &mut RecordStore, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)
        .map_err(|e| TrackerError::Import(format!("cannot open {}: {}", path.display(), e)))?;
    import_into(store, BufReader::new(file))
}

/// Read a CSV file without touching any store.
pub fn read_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)
        .map_err(|e| TrackerError::Import(format!("cannot open {}: {}", path.display(), e)))?;
    parse_records(BufReader::new(file))
}

/// Write records to a CSV file, creating or truncating it.
pub fn export_file(records: &[Record], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_records(records, BufWriter::new(file))?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
