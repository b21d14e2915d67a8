//! The logged update record and its enumerated fields.
//!
//! A `Record` is one business update. `id`, `category` and `date_logged` are
//! fixed once the record exists; `update`, `status` and `priority` change only
//! through the edit reconciler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One logged business update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `UPDATE-<n>` for records created here; imported rows may carry any id
    pub id: String,

    /// Business function the update belongs to
    pub category: String,

    /// Free-form description
    pub update: String,

    pub status: Status,

    pub priority: Priority,

    /// Calendar date the update was logged
    pub date_logged: NaiveDate,
}

impl Record {
    /// Create a freshly logged record: status `Not Started`.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        update: impl Into<String>,
        priority: Priority,
        date_logged: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            update: update.into(),
            status: Status::NotStarted,
            priority,
            date_logged,
        }
    }

    /// True when the editable fields (`update`, `status`, `priority`) differ.
    pub fn editable_fields_differ(&self, other: &Record) -> bool {
        self.update != other.update || self.status != other.status || self.priority != other.priority
    }

    /// True when the read-only fields (`id`, `category`, `date_logged`) differ.
    pub fn fixed_fields_differ(&self, other: &Record) -> bool {
        self.id != other.id || self.category != other.category || self.date_logged != other.date_logged
    }
}

/// Error returned when a status or priority label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownLabel {}

/// Lowercase and fold `_`/`-` to spaces so `in_progress` matches `In Progress`.
fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Progress state of an update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl Status {
    /// Every status, in dashboard order.
    pub const ALL: [Status; 4] = [
        Status::Completed,
        Status::InProgress,
        Status::NotStarted,
        Status::OnHold,
    ];

    /// Get the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
        }
    }

    /// Chart colour for the status distribution.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Status::Completed => "#2E8B57",
            Status::InProgress => "#FFA500",
            Status::NotStarted => "#FF4B4B",
            Status::OnHold => "#808080",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == wanted)
            .ok_or_else(|| UnknownLabel {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Urgency of an update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Get the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().to_lowercase() == wanted)
            .ok_or_else(|| UnknownLabel {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_record_defaults_to_not_started() {
        let record = Record::new("UPDATE-1001", "App Update", "Ship 2.0", Priority::High, date(2024, 5, 1));
        assert_eq!(record.status, Status::NotStarted);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.date_logged, date(2024, 5, 1));
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(Status::NotStarted.as_str(), "Not Started");
        assert_eq!(Status::InProgress.as_str(), "In Progress");
        assert_eq!(Status::Completed.as_str(), "Completed");
        assert_eq!(Status::OnHold.as_str(), "On Hold");
    }

    #[test]
    fn test_status_parse_variants() {
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(" on-hold ".parse::<Status>().unwrap(), Status::OnHold);
        assert_eq!("COMPLETED".parse::<Status>().unwrap(), Status::Completed);
    }

    #[test]
    fn test_status_parse_unknown() {
        let err = "Done".parse::<Status>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.to_string(), "unknown status 'Done'");
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("Urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(Status::Completed.color_hex(), "#2E8B57");
        assert_eq!(Status::OnHold.color_hex(), "#808080");
    }

    #[test]
    fn test_field_diffs() {
        let original = Record::new("UPDATE-1", "Legal Update", "Sign NDA", Priority::Low, date(2024, 1, 2));

        let mut edited = original.clone();
        edited.status = Status::Completed;
        assert!(edited.editable_fields_differ(&original));
        assert!(!edited.fixed_fields_differ(&original));

        let mut moved = original.clone();
        moved.category = "Client Feedback".to_string();
        assert!(!moved.editable_fields_differ(&original));
        assert!(moved.fixed_fields_differ(&original));
    }

    #[test]
    fn test_record_serializes_display_labels() {
        let record = Record::new("UPDATE-7", "App Update", "Beta", Priority::Medium, date(2024, 2, 3));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "Not Started");
        assert_eq!(json["priority"], "Medium");
        assert_eq!(json["date_logged"], "2024-02-03");
    }
}
