//! Lenient date/time parsing for cell values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));
static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// Date-time layouts tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts tried in order (month-first wins over day-first).
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%a, %d %b %Y",
];

/// Year-month layouts; parsed as the first day of the month.
const MONTH_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%b %Y %d", "%B %Y %d"];

/// How much of the calendar a parsed value actually specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// Only a year, e.g. `2021`.
    Year,
    /// Year and month, e.g. `2021-03`.
    Month,
    /// A calendar day.
    Day,
    /// A day with a time of day.
    Time,
}

/// A successfully parsed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    /// The parsed instant (naive, timezone dropped).
    pub value: NaiveDateTime,
    /// Precision of the source text.
    pub precision: DatePrecision,
}

/// Parse a cell as a date or timestamp.
///
/// Cells of numeric columns only parse as bare calendar years. Returns
/// `None` for anything unrecognised; never panics.
pub fn parse_datetime(value: &str, numeric_storage: bool) -> Option<ParsedDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if numeric_storage {
        return parse_numeric_year(trimmed);
    }

    if YEAR_ONLY.is_match(trimmed) {
        return year_start(trimmed.parse().ok()?);
    }

    if COMPACT_DATE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y%m%d")
            .ok()
            .map(|d| at_midnight(d, DatePrecision::Day));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedDate {
            value: dt.naive_utc(),
            precision: DatePrecision::Time,
        });
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(ParsedDate {
                value: dt,
                precision: DatePrecision::Time,
            });
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(at_midnight(d, DatePrecision::Day));
        }
    }

    // chrono needs a day, so supply the first of the month.
    let with_day = if trimmed.contains('-') || trimmed.contains('/') {
        format!("{}{}01", trimmed, if trimmed.contains('/') { "/" } else { "-" })
    } else {
        format!("{} 01", trimmed)
    };
    for fmt in MONTH_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Some(at_midnight(d, DatePrecision::Month));
        }
    }

    None
}

/// Check that every value in a sample parses; an empty sample does not.
pub fn all_parse_as_dates<'a>(
    sample: impl IntoIterator<Item = &'a str>,
    numeric_storage: bool,
) -> bool {
    let mut seen = false;
    for value in sample {
        seen = true;
        if parse_datetime(value, numeric_storage).is_none() {
            return false;
        }
    }
    seen
}

/// Coerce a cell to a timestamp the way a dataframe loader would.
///
/// Text cells go through [`parse_datetime`]; cells of numeric columns are
/// read as nanoseconds since the Unix epoch.
pub fn coerce_datetime(value: &str, numeric_storage: bool) -> Option<ParsedDate> {
    if numeric_storage {
        parse_epoch_nanos(value.trim())
    } else {
        parse_datetime(value, false)
    }
}

/// Check that every value in a sample coerces; an empty sample does.
pub fn all_coerce_to_dates<'a>(
    sample: impl IntoIterator<Item = &'a str>,
    numeric_storage: bool,
) -> bool {
    sample
        .into_iter()
        .all(|value| coerce_datetime(value, numeric_storage).is_some())
}

fn parse_epoch_nanos(value: &str) -> Option<ParsedDate> {
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() || number.abs() >= i64::MAX as f64 {
        return None;
    }
    let nanos = number.trunc() as i64;
    let secs = nanos.div_euclid(1_000_000_000);
    let subsec = nanos.rem_euclid(1_000_000_000) as u32;
    DateTime::from_timestamp(secs, subsec).map(|dt| ParsedDate {
        value: dt.naive_utc(),
        precision: DatePrecision::Time,
    })
}

fn parse_numeric_year(value: &str) -> Option<ParsedDate> {
    let number: f64 = value.parse().ok()?;
    if number.fract() != 0.0 || !(1000.0..=9999.0).contains(&number) {
        return None;
    }
    year_start(number as i32)
}

fn year_start(year: i32) -> Option<ParsedDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| at_midnight(d, DatePrecision::Year))
}

fn at_midnight(date: NaiveDate, precision: DatePrecision) -> ParsedDate {
    ParsedDate {
        value: date.and_time(NaiveTime::MIN),
        precision,
    }
}
