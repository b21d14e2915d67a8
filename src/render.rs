//! Text rendering of the tracker screens.
//!
//! Each function returns a `String` so the session loop decides where it
//! goes. Colour comes from the `colored` crate and is switched globally in
//! `main` according to the display config.

use crate::config::DisplayConfig;
use crate::domain::{Priority, Record, Status};
use crate::stats::Statistics;
use colored::*;
use std::fmt::Write;

const TITLE: &str = "Business Operations Tracker";

/// Title and introduction.
pub fn header() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE.bold());
    let _ = writeln!(
        out,
        "A central log of updates across business functions. Log new updates, edit existing ones, and track progress."
    );
    let _ = writeln!(out, "Type {} for a list of commands.", "help".cyan());
    out
}

/// Everything shown after a change: activity log followed by dashboard.
pub fn screen(records: &[Record], stats: &Statistics, display: &DisplayConfig) -> String {
    let mut out = activity_log(records, display);
    out.push('\n');
    out.push_str(&dashboard(stats, display));
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold().underline());
}

fn status_color(status: Status) -> Color {
    let (r, g, b) = hex_to_rgb(status.color_hex());
    Color::TrueColor { r, g, b }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Parse `#RRGGBB`; anything malformed renders white.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(255)
    };
    if hex.len() != 7 || !hex.starts_with('#') {
        return (255, 255, 255);
    }
    (channel(1..3), channel(3..5), channel(5..7))
}

/// Shorten to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    // Table cells are single-line
    let text = text.replace(['\n', '\r'], " ");
    if text.chars().count() <= max {
        return text;
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0).max(header.len())
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// The table of all updates, most recent manual entries first.
pub fn activity_log(records: &[Record], display: &DisplayConfig) -> String {
    let mut out = String::new();
    section(&mut out, "Activity Log");
    let _ = writeln!(out, "Total Updates: {}", records.len().to_string().bold());

    if records.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            "No updates have been logged yet. Use `add` to log your first update.".dimmed()
        );
        return out;
    }

    let updates: Vec<String> = records
        .iter()
        .map(|r| truncate(&r.update, display.max_description_width))
        .collect();

    let id_w = column_width("ID", records.iter().map(|r| r.id.as_str()));
    let cat_w = column_width("Category", records.iter().map(|r| r.category.as_str()));
    let upd_w = column_width("Update", updates.iter().map(String::as_str));
    let status_w = "Not Started".len();
    let prio_w = "Priority".len();

    let _ = writeln!(
        out,
        "{}",
        format!(
            "{}  {}  {}  {}  {}  {}",
            pad("ID", id_w),
            pad("Category", cat_w),
            pad("Update", upd_w),
            pad("Status", status_w),
            pad("Priority", prio_w),
            "Date Logged"
        )
        .bold()
    );

    for (record, update) in records.iter().zip(&updates) {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}  {}  {}",
            pad(&record.id, id_w).dimmed(),
            pad(&record.category, cat_w),
            pad(update, upd_w),
            pad(record.status.as_str(), status_w).color(status_color(record.status)),
            pad(record.priority.as_str(), prio_w).color(priority_color(record.priority)),
            record.date_logged.format("%Y-%m-%d")
        );
    }
    out
}

/// Metrics and charts.
pub fn dashboard(stats: &Statistics, display: &DisplayConfig) -> String {
    let mut out = String::new();
    section(&mut out, "Dashboard");

    if stats.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            "The dashboard will populate with charts and metrics once you log an update.".dimmed()
        );
        return out;
    }

    let metrics: Vec<String> = [Status::Completed, Status::InProgress, Status::NotStarted]
        .into_iter()
        .map(|status| {
            format!(
                "{} {}",
                format!("{}:", status).color(status_color(status)),
                stats.status_count(status).to_string().bold()
            )
        })
        .collect();
    let _ = writeln!(out, "{}", metrics.join("   "));
    out.push('\n');

    let _ = writeln!(out, "{}", "Updates by Category".bold());
    let max = stats.by_category.first().map(|c| c.count).unwrap_or(0);
    let label_w = stats
        .by_category
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &stats.by_category {
        let _ = writeln!(
            out,
            "  {}  {} {}",
            pad(&entry.category, label_w),
            bar(entry.count, max, display.bar_width).cyan(),
            entry.count
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{}", "Status Distribution".bold());
    for slice in &stats.by_status {
        let _ = writeln!(
            out,
            "  {}  {} {} ({:.0}%)",
            pad(slice.status.as_str(), "Not Started".len()),
            bar(slice.count, stats.total, display.bar_width).color(status_color(slice.status)),
            slice.count,
            slice.share * 100.0
        );
    }
    out
}

/// Horizontal bar scaled so `max` fills `width` cells.
fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = ((count * width) as f64 / max as f64).round().max(1.0) as usize;
    "█".repeat(cells.min(width))
}

/// The configured category choices.
pub fn categories(choices: &[String]) -> String {
    let mut out = String::new();
    section(&mut out, "Categories");
    for choice in choices {
        let _ = writeln!(out, "  {}", choice);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate;
    use chrono::NaiveDate;

    fn record(id: &str, category: &str, status: Status) -> Record {
        let mut r = Record::new(
            id,
            category,
            "Call back about invoice",
            Priority::High,
            NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
        );
        r.status = status;
        r
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#2E8B57"), (0x2E, 0x8B, 0x57));
        assert_eq!(hex_to_rgb("nope"), (255, 255, 255));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("two\nlines", 20), "two lines");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10, 20), "");
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert_eq!(bar(5, 10, 20).chars().count(), 10);
        assert_eq!(bar(1, 1000, 20).chars().count(), 1);
    }

    #[test]
    fn test_empty_activity_log() {
        let out = activity_log(&[], &DisplayConfig::default());
        assert!(out.contains("Total Updates"));
        assert!(out.contains("No updates have been logged yet"));
    }

    #[test]
    fn test_activity_log_rows() {
        let records = vec![record("UPDATE-1001", "Client Feedback", Status::OnHold)];
        let out = activity_log(&records, &DisplayConfig::default());
        assert!(out.contains("UPDATE-1001"));
        assert!(out.contains("Client Feedback"));
        assert!(out.contains("On Hold"));
        assert!(out.contains("2024-12-24"));
    }

    #[test]
    fn test_empty_dashboard() {
        let out = dashboard(&aggregate(&[]), &DisplayConfig::default());
        assert!(out.contains("will populate"));
    }

    #[test]
    fn test_dashboard_sections() {
        let records = vec![
            record("1", "Legal Update", Status::Completed),
            record("2", "Legal Update", Status::InProgress),
        ];
        let out = dashboard(&aggregate(&records), &DisplayConfig::default());
        assert!(out.contains("Updates by Category"));
        assert!(out.contains("Status Distribution"));
        assert!(out.contains("Legal Update"));
        assert!(out.contains("(50%)"));
    }

    #[test]
    fn test_categories_listing() {
        let out = categories(&["App Update".to_string(), "Custom".to_string()]);
        assert!(out.contains("App Update"));
        assert!(out.contains("Custom"));
    }
}
