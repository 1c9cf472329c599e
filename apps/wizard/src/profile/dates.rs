//! Date normalization for wizard date fields.
//!
//! Resume parsers and stored profiles hand back dates as "Mar 2025",
//! "March, 2025", ISO dates or full timestamps. The wizard's date inputs only
//! understand `YYYY-MM-DD`, so everything goes through a `DateNormalizer`
//! before it reaches the record. Unparseable input becomes `""`, never an error.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

/// Strategy for turning free-form date text into a `YYYY-MM-DD` string.
pub trait DateNormalizer: Send + Sync {
    /// Returns an ISO calendar date, or `""` when the input is empty or unparseable.
    fn normalize(&self, input: &str) -> String;
}

/// Month/year granularity: output always falls on the 1st of the month.
///
/// 1. Tokenize on whitespace, commas, periods and hyphens.
/// 2. A 4-digit token is the year; any other token whose first three letters
///    name a month is the month.
/// 3. Year and month both found → that month's 1st.
/// 4. Otherwise parse the raw text as a date and move it to the 1st.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthYearNormalizer;

/// Keeps the parsed day. Used where stored values are already full dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDateNormalizer;

impl DateNormalizer for MonthYearNormalizer {
    fn normalize(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return String::new();
        }
        let date = month_year_tokens(input).or_else(|| parse_loose(input).and_then(first_of_month));
        render(date, input)
    }
}

impl DateNormalizer for CalendarDateNormalizer {
    fn normalize(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return String::new();
        }
        let date = parse_loose(input).or_else(|| month_year_tokens(input));
        render(date, input)
    }
}

fn render(date: Option<NaiveDate>, input: &str) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => {
            warn!("Invalid date format: {input:?}");
            String::new()
        }
    }
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("sept", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

fn month_index(token: &str) -> Option<u32> {
    let prefix: String = token.chars().take(3).collect();
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .or_else(|| MONTHS.iter().find(|(name, _)| *name == prefix))
        .map(|(_, index)| *index)
}

fn month_year_tokens(input: &str) -> Option<NaiveDate> {
    let lowered = input.trim().to_lowercase();
    let mut year = None;
    let mut month = None;

    for token in lowered
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .filter(|t| !t.is_empty())
    {
        if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            year = token.parse::<i32>().ok();
        } else if let Some(m) = month_index(token) {
            month = Some(m);
        }
    }

    match (year, month) {
        (Some(y), Some(m)) if y != 0 => NaiveDate::from_ymd_opt(y, m, 1),
        _ => None,
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const MONTH_FORMATS: &[&str] = &["%m/%Y", "%Y-%m", "%Y/%m"];

/// Generic date parsing of the raw text, in UTC.
fn parse_loose(input: &str) -> Option<NaiveDate> {
    let raw = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(d);
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        // a bare year means January 1st
        return raw
            .parse::<i32>()
            .ok()
            .filter(|y| *y != 0)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }
    let padded = format!("1 {raw}");
    MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&padded, &format!("%d {fmt}")).ok())
}

/// Configured choice of normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStrategy {
    #[default]
    MonthYear,
    Calendar,
}

impl DateStrategy {
    pub fn normalizer(self) -> Arc<dyn DateNormalizer> {
        match self {
            DateStrategy::MonthYear => Arc::new(MonthYearNormalizer),
            DateStrategy::Calendar => Arc::new(CalendarDateNormalizer),
        }
    }
}

impl FromStr for DateStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month-year" | "month_year" | "monthyear" => Ok(DateStrategy::MonthYear),
            "calendar" => Ok(DateStrategy::Calendar),
            other => Err(format!(
                "unknown date strategy '{other}' (expected 'month-year' or 'calendar')"
            )),
        }
    }
}
