//! Display helpers for file rows.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const DEFAULT_ICON: &str = "fas fa-file";

pub fn format_file_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[unit_index])
    } else {
        format!("{:.1} {}", value, UNITS[unit_index])
    }
}

/// Icon class for a file name, keyed on its lowercase extension.
pub fn file_icon(filename: &str) -> &'static str {
    let extension = match filename.rfind('.') {
        Some(i) if i + 1 < filename.len() => filename[i + 1..].to_lowercase(),
        _ => return DEFAULT_ICON,
    };

    match extension.as_str() {
        "pdf" => "fas fa-file-pdf",
        "doc" | "docx" => "fas fa-file-word",
        "txt" => "fas fa-file-alt",
        "md" => "fab fa-markdown",
        _ => DEFAULT_ICON,
    }
}

/// Korean short date (`2024. 1. 15.`) for an ISO timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and bare dates.
/// Anything else is returned unchanged.
pub fn format_updated(updated: &str) -> String {
    match parse_date(updated.trim()) {
        Some(date) => format!("{}. {}. {}.", date.year(), date.month(), date.day()),
        None => updated.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
