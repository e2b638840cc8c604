//! Output formatting utilities for CLI commands
//!
//! Provides consistent formatting for:
//! - Tables with column alignment
//! - Timestamps (relative)
//! - Colors per quality status

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use dropwatch_triage::TriageOutcome;
use serde::Serialize;
use std::path::Path;

/// Format a timestamp relative to `now`
///
/// Examples:
/// - 30 seconds ago -> "just now"
/// - 5 minutes ago -> "5 min ago"
/// - 3 hours ago -> "3 hours ago"
/// - older than a week -> "2024-01-15 10:30"
pub fn format_time_since(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - time).num_seconds();
    if secs < 0 {
        return time.format("%Y-%m-%d %H:%M").to_string();
    }
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{} min ago", secs / 60)
    } else if secs < 86_400 {
        let hours = secs / 3600;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if secs < 7 * 86_400 {
        let days = secs / 86_400;
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else {
        time.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub fn format_time(time: DateTime<Utc>) -> String {
    format_time_since(time, Utc::now())
}

/// Color for a status label
pub fn color_for_status(label: &str) -> Color {
    match label {
        "COMPLETE" => Color::Green,
        "PARTIAL" => Color::Yellow,
        "EMPTY" => Color::Red,
        _ => Color::DarkGrey,
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

/// Key/value rows describing an outcome, status first.
pub fn outcome_rows(outcome: &TriageOutcome) -> Vec<(&'static str, String)> {
    let stages = outcome
        .next_stages()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match outcome {
        TriageOutcome::NoFile(report) => vec![
            ("Status", outcome.status_label().to_string()),
            ("Directory", report.directory.display().to_string()),
            ("Next stages", stages),
        ],
        TriageOutcome::Triaged(report) => vec![
            ("Status", outcome.status_label().to_string()),
            ("File", report.file.clone()),
            ("Records", report.total_records.to_string()),
            ("Training", display_path(report.training_path.as_deref())),
            ("Revised", display_path(report.revised_path.as_deref())),
            ("Next stages", stages),
        ],
    }
}

/// Print an outcome as a two-column table with a colored status.
pub fn print_outcome(outcome: &TriageOutcome) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    for (field, value) in outcome_rows(outcome) {
        let cell = if field == "Status" {
            Cell::new(&value).fg(color_for_status(&value))
        } else {
            Cell::new(&value)
        };
        table.add_row(vec![Cell::new(field), cell]);
    }

    println!("{}", table);
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line summary used by `watch`.
pub fn status_line(outcome: &TriageOutcome) -> String {
    match outcome.report() {
        Some(report) => format!(
            "{} {} ({} records)",
            report.status, report.file, report.total_records
        ),
        None => format!("{} no qualifying file", outcome.status_label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use dropwatch_triage::{NoFileReport, QualityStatus, Stage, TriageReport};
    use std::path::PathBuf;

    #[test]
    fn test_format_time_since() {
        let now = Utc::now();
        assert_eq!(format_time_since(now - Duration::seconds(10), now), "just now");
        assert_eq!(format_time_since(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(format_time_since(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_time_since(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn test_outcome_rows_no_file() {
        let outcome = TriageOutcome::NoFile(NoFileReport::new("watch_folder"));
        let rows = outcome_rows(&outcome);
        assert_eq!(rows[0], ("Status", "NONE".to_string()));
        assert_eq!(rows[2], ("Next stages", "watchdog".to_string()));
    }

    #[test]
    fn test_outcome_rows_partial() {
        let outcome = TriageOutcome::Triaged(TriageReport {
            file: "sales.csv".to_string(),
            total_records: 7,
            status: QualityStatus::Partial,
            training_path: Some(PathBuf::from("Updated/sales/sales.csv")),
            revised_path: None,
            next_stages: vec![Stage::Classifier, Stage::Preprocessing],
        });
        let rows = outcome_rows(&outcome);
        assert_eq!(rows[0].1, "PARTIAL");
        assert_eq!(rows[2].1, "7");
        assert_eq!(rows[4].1, "-");
        assert_eq!(rows[5].1, "classifier, preprocessing");
        assert_eq!(status_line(&outcome), "PARTIAL sales.csv (7 records)");
    }

    #[test]
    fn test_color_for_status() {
        assert_eq!(color_for_status("COMPLETE"), Color::Green);
        assert_eq!(color_for_status("NONE"), Color::DarkGrey);
    }
}
