//! ID allocation for logged updates
//!
//! Ids look like `UPDATE-1001`. The next id is one past the largest numeric
//! suffix already in use. Ids that don't carry a numeric `UPDATE-` suffix
//! (foreign or malformed ids arriving through CSV import) are skipped rather
//! than failing allocation.

use crate::domain::Record;

/// Prefix shared by every id this crate allocates.
pub const ID_PREFIX: &str = "UPDATE-";

/// First suffix handed out when no well-formed id exists yet.
pub const FIRST_ID_NUMBER: u64 = 1001;

/// Extract the numeric suffix of an `UPDATE-<n>` id.
///
/// Returns `None` for a missing prefix, an empty or non-digit suffix, or a
/// value that overflows `u64`.
pub fn parse_suffix(id: &str) -> Option<u64> {
    let suffix = id.strip_prefix(ID_PREFIX)?;
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Format a suffix as a full id.
///
/// Example: `format_id(1001)` is `"UPDATE-1001"`
pub fn format_id(number: u64) -> String {
    format!("{}{}", ID_PREFIX, number)
}

/// Compute the next numeric suffix for the given records.
pub fn next_id_number(records: &[Record]) -> u64 {
    records
        .iter()
        .filter_map(|record| parse_suffix(&record.id))
        .max()
        .map(|max| max.saturating_add(1))
        .unwrap_or(FIRST_ID_NUMBER)
}

/// Compute the next full id for the given records.
pub fn next_id(records: &[Record]) -> String {
    format_id(next_id_number(records))
}
