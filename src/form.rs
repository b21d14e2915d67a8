//! The "log a new update" form.
//!
//! A submission names a category from the configured list (or `Custom` plus a
//! custom name), a description and a priority. Accepted submissions become a
//! new `Not Started` record dated today, prepended to the store.

use crate::domain::{Priority, Record};
use crate::error::{Result, ValidationWarning};
use crate::id;
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::info;

/// The list entry that switches the form to a user-supplied category name.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// Built-in category choices.
pub fn default_categories() -> Vec<String> {
    [
        "Lead Contacted",
        "Client Payment Received",
        "Client Feedback",
        "Software Update",
        "App Update",
        "Digital Marketing Update",
        "Mixing and Mastering Update",
        "Operations Update",
        "Utilities Update",
        "Resource Purchase",
        "Legal Update",
        "UI/UX Update",
        CUSTOM_CATEGORY,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// One form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    /// Selected entry from the category list
    pub category: String,
    /// Used only when `category` is `Custom`
    pub custom_category: Option<String>,
    pub description: String,
    pub priority: Priority,
}

impl UpdateForm {
    /// Resolve the category the record will carry.
    ///
    /// The selection is matched case-insensitively against `choices`.
    pub fn resolve_category(&self, choices: &[String]) -> std::result::Result<String, ValidationWarning> {
        let selected = self.category.trim();
        let canonical = choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(selected))
            .ok_or_else(|| ValidationWarning::UnknownCategory(selected.to_string()))?;

        if canonical != CUSTOM_CATEGORY {
            return Ok(canonical.clone());
        }

        match self.custom_category.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() && !custom.eq_ignore_ascii_case(CUSTOM_CATEGORY) => {
                Ok(custom.to_string())
            }
            _ => Err(ValidationWarning::MissingCustomCategory),
        }
    }
}

/// Validate a submission and prepend the resulting record to the store.
///
/// Returns the new record. On a validation warning nothing is changed.
pub fn submit(store: &mut RecordStore, form: &UpdateForm, choices: &[String], today: NaiveDate) -> Result<Record> {
    let description = form.description.trim();
    if description.is_empty() {
        return Err(ValidationWarning::MissingDescription.into());
    }
    let category = form.resolve_category(choices)?;

    let record = Record::new(id::next_id(store.all()), category, description, form.priority, today);
    store.add(record.clone())?;
    info!("Logged update {} ({})", record.id, record.category);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::error::TrackerError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
    }

    fn form(category: &str, description: &str) -> UpdateForm {
        UpdateForm {
            category: category.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_first_update() {
        let mut store = RecordStore::new();
        let mut f = form("Software Update", "Fix login bug");
        f.priority = Priority::High;

        let record = submit(&mut store, &f, &default_categories(), today()).unwrap();
        assert_eq!(record.id, "UPDATE-1001");
        assert_eq!(record.status, Status::NotStarted);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.date_logged, today());
        assert_eq!(store.all(), &[record]);
    }

    #[test]
    fn test_submit_prepends_and_increments() {
        let mut store = RecordStore::new();
        let choices = default_categories();
        submit(&mut store, &form("App Update", "first"), &choices, today()).unwrap();
        submit(&mut store, &form("App Update", "second"), &choices, today()).unwrap();

        assert_eq!(store.all()[0].id, "UPDATE-1002");
        assert_eq!(store.all()[0].update, "second");
        assert_eq!(store.all()[1].id, "UPDATE-1001");
    }

    #[test]
    fn test_default_priority_is_medium() {
        let mut store = RecordStore::new();
        let record = submit(&mut store, &form("Legal Update", "File trademark"), &default_categories(), today()).unwrap();
        assert_eq!(record.priority, Priority::Medium);
    }

    #[test]
    fn test_missing_description_warns() {
        let mut store = RecordStore::new();
        let result = submit(&mut store, &form("App Update", "   "), &default_categories(), today());
        assert!(matches!(
            result,
            Err(TrackerError::Validation(ValidationWarning::MissingDescription))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_category_used() {
        let mut store = RecordStore::new();
        let mut f = form("custom", "Plan offsite");
        f.custom_category = Some("Team Events".to_string());

        let record = submit(&mut store, &f, &default_categories(), today()).unwrap();
        assert_eq!(record.category, "Team Events");
    }

    #[test]
    fn test_blank_custom_category_warns() {
        let mut store = RecordStore::new();
        let mut f = form("Custom", "Plan offsite");
        f.custom_category = Some("  ".to_string());

        let result = submit(&mut store, &f, &default_categories(), today());
        assert!(matches!(
            result,
            Err(TrackerError::Validation(ValidationWarning::MissingCustomCategory))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_named_custom_warns() {
        let mut store = RecordStore::new();
        for name in ["Custom", " custom "] {
            let mut f = form("Custom", "Plan offsite");
            f.custom_category = Some(name.to_string());

            let result = submit(&mut store, &f, &default_categories(), today());
            assert!(matches!(
                result,
                Err(TrackerError::Validation(ValidationWarning::MissingCustomCategory))
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_name_ignored_for_listed_category() {
        let mut f = form("app update", "x");
        f.custom_category = Some("Ignored".to_string());
        assert_eq!(f.resolve_category(&default_categories()).unwrap(), "App Update");
    }

    #[test]
    fn test_unknown_category_warns() {
        let f = form("Gardening", "x");
        assert_eq!(
            f.resolve_category(&default_categories()),
            Err(ValidationWarning::UnknownCategory("Gardening".to_string()))
        );
    }

    #[test]
    fn test_id_skips_past_imported_ids() {
        let mut store = RecordStore::new();
        store.merge(vec![
            Record::new("UPDATE-2000", "App Update", "old", Priority::Low, today()),
            Record::new("UPDATE-oops", "App Update", "foreign", Priority::Low, today()),
        ]);
        let record = submit(&mut store, &form("App Update", "new"), &default_categories(), today()).unwrap();
        assert_eq!(record.id, "UPDATE-2001");
    }
}
