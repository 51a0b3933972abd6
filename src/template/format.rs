// src/template/format.rs
//! Locale-free date labels for templates

use chrono::Datelike;

use crate::types::parse_iso_date;

pub const PRESENT: &str = "Present";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "2021-01-01T00:00:00.000Z" -> "Jan 2021"; unparsable input is returned as-is
pub fn month_year(value: &str) -> String {
    match parse_iso_date(value) {
        Ok(date) => format!("{} {}", MONTHS[date.month0() as usize], date.year()),
        Err(_) => value.to_string(),
    }
}

pub fn year(value: &str) -> String {
    match parse_iso_date(value) {
        Ok(date) => date.year().to_string(),
        Err(_) => value.to_string(),
    }
}

/// End label for a dated entry; `end` must already have the ongoing flag applied
pub fn end_label(end: Option<&str>, format: fn(&str) -> String) -> String {
    match end {
        Some(value) if !value.trim().is_empty() => format(value),
        _ => PRESENT.to_string(),
    }
}

pub fn range(start: &str, end: Option<&str>, format: fn(&str) -> String) -> String {
    format!("{} - {}", format(start), end_label(end, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_year_formatting() {
        assert_eq!(month_year("2021-01-01T00:00:00.000Z"), "Jan 2021");
        assert_eq!(month_year("2019-06-15"), "Jun 2019");
        assert_eq!(month_year("2020-12-31T23:59:59Z"), "Dec 2020");
        assert_eq!(month_year("not a date"), "not a date");
    }

    #[test]
    fn test_year_formatting() {
        assert_eq!(year("2015-09-01T00:00:00.000Z"), "2015");
        assert_eq!(year("garbage"), "garbage");
    }

    #[test]
    fn test_missing_end_renders_present() {
        assert_eq!(end_label(None, month_year), "Present");
        assert_eq!(end_label(Some(""), month_year), "Present");
        assert_eq!(end_label(Some("2023-05-01"), month_year), "May 2023");
        assert_eq!(range("2015-09-01", None, year), "2015 - Present");
        assert_eq!(range("2021-01-01", Some("2021-03-01"), month_year), "Jan 2021 - Mar 2021");
    }
}
