//! Date formatting helpers

use chrono::NaiveDate;

/// ISO calendar date, the canonical display format
pub fn format_iso(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long human-readable form, e.g. "April 25, 2022"
pub fn format_long(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
