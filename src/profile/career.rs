//! Career duration labels.
//!
//! Month arithmetic only: days are ignored, so 2020-01-31 to 2020-02-01
//! counts as one month.

use chrono::{Datelike, NaiveDate};

/// Raw elapsed months between two dates. Negative when `end` precedes `start`.
pub fn career_months(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// Label for a career span, using `today` when the entry has no end date.
///
/// | years | months | label          |
/// |-------|--------|----------------|
/// | > 0   | > 0    | `(Y년 M개월)`   |
/// | > 0   | 0      | `(Y년)`         |
/// | 0     | > 0    | `(M개월)`       |
/// | 0     | 0      | empty          |
pub fn career_duration(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> String {
    format_months(career_months(start, end.unwrap_or(today)))
}

/// Negative spans (start after end) are clamped to zero and render empty.
pub fn format_months(total_months: i32) -> String {
    let total = total_months.max(0);
    let years = total / 12;
    let months = total % 12;

    match (years > 0, months > 0) {
        (true, true) => format!("({}년 {}개월)", years, months),
        (true, false) => format!("({}년)", years),
        (false, true) => format!("({}개월)", months),
        (false, false) => String::new(),
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or an ISO timestamp's date prefix.
pub fn parse_career_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(date) = s
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok()
}
