//! Per-session application state.
//!
//! A `Session` is created when the user starts the tracker and dropped when
//! they leave. It exclusively owns the record store; every mutation goes
//! through [`Session::apply`], whose [`Outcome`] tells the caller whether the
//! display must be redrawn.

use crate::config::Config;
use crate::domain::{Priority, Record, Status};
use crate::error::{Result, ValidationWarning};
use crate::form::{self, UpdateForm};
use crate::import::{self, ImportReport, table::DATE_FORMAT};
use crate::reconcile::{self, Reconciliation};
use crate::stats::{self, Statistics};
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::info;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

/// A table column, as named by a cell edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Category,
    Update,
    Status,
    Priority,
    DateLogged,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Category => "Category",
            Column::Update => "Update",
            Column::Status => "Status",
            Column::Priority => "Priority",
            Column::DateLogged => "Date Logged",
        }
    }

    /// Whether the table lets the user change this column.
    pub fn is_editable(&self) -> bool {
        matches!(self, Column::Update | Column::Status | Column::Priority)
    }
}

impl FromStr for Column {
    type Err = ValidationWarning;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "id" => Ok(Column::Id),
            "category" => Ok(Column::Category),
            "update" | "description" => Ok(Column::Update),
            "status" => Ok(Column::Status),
            "priority" => Ok(Column::Priority),
            "date logged" | "date" => Ok(Column::DateLogged),
            _ => Err(ValidationWarning::UnknownColumn(s.to_string())),
        }
    }
}

/// A user interaction that may change the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the "log a new update" form
    Add(UpdateForm),
    /// Import or merge a CSV file
    Import(PathBuf),
    /// Write the current table to a CSV file
    Export(PathBuf),
    /// Change one cell of the table
    Edit { id: String, column: Column, value: String },
    /// Apply a full edited table read from a CSV file
    Apply(PathBuf),
    /// Drop every record
    Reset,
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(Record),
    Imported(ImportReport),
    Exported { path: PathBuf, count: usize },
    Reconciled(Reconciliation),
    Reset { cleared: usize },
}

impl Outcome {
    /// Whether the store changed, so statistics and the table must be redrawn.
    pub fn changed_store(&self) -> bool {
        match self {
            Outcome::Added(_) => true,
            Outcome::Imported(report) => report.changed_store(),
            Outcome::Exported { .. } => false,
            Outcome::Reconciled(r) => r.is_changed(),
            Outcome::Reset { cleared } => *cleared > 0,
        }
    }

    /// One-line message for the user.
    pub fn message(&self) -> String {
        match self {
            Outcome::Added(record) => format!("Update logged successfully! ({})", record.id),
            Outcome::Imported(report) => report.summary(),
            Outcome::Exported { path, count } => format!("Exported {} updates to {}", count, path.display()),
            Outcome::Reconciled(r) => {
                let mut msg = match r {
                    Reconciliation::Unchanged { .. } => "No changes to apply.".to_string(),
                    Reconciliation::Changed { rows_changed, .. } => format!("Saved edits to {} update(s).", rows_changed),
                };
                if r.discarded_fixed_edits() > 0 {
                    msg.push_str(&format!(
                        " Ignored edits to read-only columns on {} row(s).",
                        r.discarded_fixed_edits()
                    ));
                }
                msg
            }
            Outcome::Reset { cleared } => format!("Session reset, {} updates cleared.", cleared),
        }
    }
}

/// State for one tracker session.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    config: Config,
    /// Fixed "today" for reproducible sessions; `None` uses the local clock
    today: Option<NaiveDate>,
}

impl Session {
    /// Start a session with an empty store.
    pub fn new(config: Config) -> Self {
        info!("Session started");
        Self {
            store: RecordStore::new(),
            config,
            today: None,
        }
    }

    /// Pin the date used for newly logged updates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        self.store.all()
    }

    pub fn statistics(&self) -> Statistics {
        stats::aggregate(self.store.all())
    }

    /// Category choices offered by the form.
    pub fn categories(&self) -> &[String] {
        &self.config.form.categories
    }

    /// Build a form with the configured default priority.
    pub fn new_form(&self, category: &str, description: &str, custom: Option<String>, priority: Option<Priority>) -> UpdateForm {
        UpdateForm {
            category: category.to_string(),
            custom_category: custom,
            description: description.to_string(),
            priority: priority.unwrap_or(self.config.form.default_priority),
        }
    }

    /// Perform one action against the store.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::Add(form) => {
                let today = self.today();
                let record = form::submit(&mut self.store, &form, &self.config.form.categories, today)?;
                Ok(Outcome::Added(record))
            }
            Action::Import(path) => Ok(Outcome::Imported(import::import_file(&mut self.store, &path)?)),
            Action::Export(path) => {
                import::export_file(self.store.all(), &path)?;
                Ok(Outcome::Exported {
                    count: self.store.len(),
                    path,
                })
            }
            Action::Edit { id, column, value } => {
                let snapshot = self.snapshot_with_edit(&id, column, &value)?;
                self.apply_snapshot(snapshot)
            }
            Action::Apply(path) => {
                let snapshot = import::read_file(&path)?;
                self.apply_snapshot(snapshot)
            }
            Action::Reset => {
                let cleared = self.store.len();
                self.store.clear();
                info!("Session reset, cleared {} records", cleared);
                Ok(Outcome::Reset { cleared })
            }
        }
    }

    /// Import CSV data from any reader.
    pub fn import_from<R: Read>(&mut self, reader: R) -> Result<ImportReport> {
        import::import_into(&mut self.store, reader)
    }

    /// Reconcile a full edited table against the store.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Record>) -> Result<Outcome> {
        Ok(Outcome::Reconciled(reconcile::reconcile(&mut self.store, snapshot)?))
    }

    /// Copy the current table with a single cell changed, as the table widget would.
    fn snapshot_with_edit(&self, id: &str, column: Column, value: &str) -> Result<Vec<Record>> {
        let mut snapshot = self.store.all().to_vec();
        let row = snapshot
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ValidationWarning::UnknownRecord(id.to_string()))?;

        let invalid = || ValidationWarning::InvalidValue {
            column: column.as_str().to_string(),
            value: value.to_string(),
        };

        match column {
            Column::Id => row.id = value.trim().to_string(),
            Column::Category => row.category = value.trim().to_string(),
            Column::Update => row.update = value.to_string(),
            Column::Status => row.status = Status::from_str(value).map_err(|_| invalid())?,
            Column::Priority => row.priority = Priority::from_str(value).map_err(|_| invalid())?,
            Column::DateLogged => {
                row.date_logged = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| invalid())?
            }
        }
        Ok(snapshot)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!("Session ended with {} records", self.store.len());
    }
}
