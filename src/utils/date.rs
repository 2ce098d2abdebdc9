use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
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

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// The reporting period a new form defaults to: the month before `day`
/// (December of the previous year in January).
pub fn previous_month(day: NaiveDate) -> (&'static str, i32) {
    if day.month() == 1 {
        (MONTH_NAMES[11], day.year() - 1)
    } else {
        (MONTH_NAMES[day.month0() as usize - 1], day.year())
    }
}

/// Years offered by the period selector: the current one and the five
/// before it.
pub fn selectable_years(day: NaiveDate) -> Vec<i32> {
    (0..=5).map(|back| day.year() - back).collect()
}
