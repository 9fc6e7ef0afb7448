//! Campaign date formatting for `date` elements.
//!
//! Patterns are built from the tokens `YYYY`, `MMMM`, `MMM`, `MM`, and `DD`;
//! every other character is copied through. Formatting never fails: without a
//! date the pattern itself is returned.

#[cfg(test)]
#[path = "date_test.rs"]
mod date_test;

use time::Date;
use time::macros::format_description;

/// Patterns offered by the date element inspector.
pub const DATE_FORMATS: [&str; 6] = ["DD/MM/YYYY", "MM/DD/YYYY", "YYYY-MM-DD", "DD.MM.YYYY", "DD MMM YYYY", "MMMM DD, YYYY"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format `date` with `pattern`, or return `pattern` unchanged when there is no date.
#[must_use]
pub fn format_campaign_date(date: Option<Date>, pattern: &str) -> String {
    let Some(date) = date else {
        return pattern.to_owned();
    };

    let month_idx = usize::from(u8::from(date.month())) - 1;
    let month_name = MONTH_NAMES[month_idx];
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("YYYY") {
            out.push_str(&format!("{:04}", date.year()));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("MMMM") {
            out.push_str(month_name);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("MMM") {
            out.push_str(&month_name[..3]);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("MM") {
            out.push_str(&format!("{:02}", u8::from(date.month())));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("DD") {
            out.push_str(&format!("{:02}", date.day()));
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

/// Parse a stored date: `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
///
/// Anything else yields `None`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10)?;
    if trimmed.len() > 10 && !trimmed[10..].starts_with(['T', 't', ' ']) {
        return None;
    }
    match Date::parse(date_part, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(raw, error = %e, "unparseable date");
            None
        }
    }
}

/// Resolve a stored date value (string or null) and format it.
#[must_use]
pub fn format_stored_date(raw: Option<&str>, pattern: &str) -> String {
    format_campaign_date(raw.and_then(parse_date), pattern)
}
