//! CSV table format shared by import, export and edited snapshots.
//!
//! Columns: `ID, Category, Update, Status, Priority, Date Logged`, dates as
//! `YYYY-MM-DD`. Column order is free and extra columns are ignored.

use crate::domain::{Priority, Record, Status};
use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};
use std::str::FromStr;

pub const COL_ID: &str = "ID";
pub const COL_CATEGORY: &str = "Category";
pub const COL_UPDATE: &str = "Update";
pub const COL_STATUS: &str = "Status";
pub const COL_PRIORITY: &str = "Priority";
pub const COL_DATE_LOGGED: &str = "Date Logged";

/// Required header columns, in export order.
pub const COLUMNS: [&str; 6] = [
    COL_ID,
    COL_CATEGORY,
    COL_UPDATE,
    COL_STATUS,
    COL_PRIORITY,
    COL_DATE_LOGGED,
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Position of each required column in the input header.
struct ColumnMap {
    id: usize,
    category: usize,
    update: usize,
    status: usize,
    priority: usize,
    date_logged: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TrackerError::Schema(missing));
        }

        // All present, checked above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            id: at(COL_ID),
            category: at(COL_CATEGORY),
            update: at(COL_UPDATE),
            status: at(COL_STATUS),
            priority: at(COL_PRIORITY),
            date_logged: at(COL_DATE_LOGGED),
        })
    }
}

/// Parse every row of a CSV table into records.
///
/// All-or-nothing: the first bad row fails the whole parse.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        records.push(parse_row(&row, &columns, idx + 1)?);
    }
    Ok(records)
}

fn parse_row(row: &StringRecord, columns: &ColumnMap, row_num: usize) -> Result<Record> {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let id = non_empty(cell(columns.id), COL_ID, row_num)?;
    let category = non_empty(cell(columns.category), COL_CATEGORY, row_num)?;
    let status = parse_cell::<Status>(cell(columns.status), COL_STATUS, row_num)?;
    let priority = parse_cell::<Priority>(cell(columns.priority), COL_PRIORITY, row_num)?;

    let raw_date = cell(columns.date_logged);
    let date_logged = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
        TrackerError::Format(format!("row {}, {}: '{}' ({})", row_num, COL_DATE_LOGGED, raw_date, e))
    })?;

    Ok(Record {
        id,
        category,
        update: cell(columns.update).to_string(),
        status,
        priority,
        date_logged,
    })
}

fn non_empty(value: &str, column: &str, row_num: usize) -> Result<String> {
    if value.is_empty() {
        return Err(TrackerError::Format(format!("row {}, {}: empty value", row_num, column)));
    }
    Ok(value.to_string())
}

fn parse_cell<T>(value: &str, column: &str, row_num: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| TrackerError::Format(format!("row {}, {}: {}", row_num, column, e)))
}

/// Write records as a CSV table with the standard header.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(COLUMNS).map_err(csv_io)?;

    for record in records {
        let date = record.date_logged.format(DATE_FORMAT).to_string();
        wtr.write_record([
            record.id.as_str(),
            record.category.as_str(),
            record.update.as_str(),
            record.status.as_str(),
            record.priority.as_str(),
            date.as_str(),
        ])
        .map_err(csv_io)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_io(err: csv::Error) -> TrackerError {
    TrackerError::Io(err.into())
}
