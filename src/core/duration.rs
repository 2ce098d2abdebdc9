//! Elapsed-time descriptions between two calendar dates.
//!
//! Counting is inclusive of the end date: a span that starts and ends on the
//! same day lasts one day. Month and year steps roll over like a calendar
//! widget does (Jan 31 + 1 month = Mar 3 in a non-leap year).

use crate::utils::date::parse_date;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Text shown in place of a duration when the end date precedes the start.
pub const INVALID_DATES: &str = "Invalid dates";

/// Spans shorter than this many days are reported as a plain day count in
/// short mode.
const SHORT_SPAN_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationMode {
    /// Plain day count below 30 days, decomposition above.
    Short,
    /// Always years / months / days.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    Empty,
    Invalid,
    Days(i64),
    Span { years: u32, months: u32, days: i64 },
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Elapsed::Empty => Ok(()),
            Elapsed::Invalid => f.write_str(INVALID_DATES),
            Elapsed::Days(n) => f.write_str(&plural(n, "day")),
            Elapsed::Span {
                years,
                months,
                days,
            } => {
                let mut parts = Vec::with_capacity(3);
                if years > 0 {
                    parts.push(plural(i64::from(years), "year"));
                }
                if months > 0 {
                    parts.push(plural(i64::from(months), "month"));
                }
                if days > 0 {
                    parts.push(plural(days, "day"));
                }
                f.write_str(&parts.join(", "))
            }
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Move `date` forward by `months`, letting an out-of-range day spill into
/// the following month.
fn roll_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let first = NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// Greedy decomposition: whole years, then whole months, then the inclusive
/// remainder in days.
fn decompose(start: NaiveDate, end: NaiveDate) -> Elapsed {
    let mut cursor = start;
    let mut years = 0;
    let mut months = 0;

    while let Some(next) = roll_months(cursor, 12) {
        if next > end {
            break;
        }
        years += 1;
        cursor = next;
    }

    while let Some(next) = roll_months(cursor, 1) {
        if next > end {
            break;
        }
        months += 1;
        cursor = next;
    }

    Elapsed::Span {
        years,
        months,
        days: (end - cursor).num_days() + 1,
    }
}

/// Compute the elapsed time between two optional dates.
pub fn elapsed(start: Option<NaiveDate>, end: Option<NaiveDate>, mode: DurationMode) -> Elapsed {
    let (Some(start), Some(end)) = (start, end) else {
        return Elapsed::Empty;
    };

    if end < start {
        return Elapsed::Invalid;
    }

    if mode == DurationMode::Short {
        let days = (end - start).num_days() + 1;
        if days < SHORT_SPAN_DAYS {
            return Elapsed::Days(days);
        }
    }

    decompose(start, end)
}

/// Same as [`elapsed`], rendered for display.
pub fn describe(start: Option<NaiveDate>, end: Option<NaiveDate>, mode: DurationMode) -> String {
    elapsed(start, end, mode).to_string()
}

/// Duration text for two raw date cells (`YYYY-MM-DD`).
///
/// A blank cell yields an empty description; a cell holding anything that is
/// not a date is reported as invalid.
pub fn describe_cells(start: &str, end: &str, mode: DurationMode) -> String {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return String::new();
    }

    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => describe(Some(s), Some(e), mode),
        _ => INVALID_DATES.to_string(),
    }
}
