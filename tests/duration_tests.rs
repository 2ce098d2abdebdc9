use chrono::NaiveDate;
use scireport::core::duration::{
    DurationMode, Elapsed, INVALID_DATES, describe, describe_cells, elapsed,
};

fn d(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[test]
fn missing_date_gives_empty_text() {
    assert_eq!(describe(None, d("2024-01-01"), DurationMode::Short), "");
    assert_eq!(describe(d("2024-01-01"), None, DurationMode::Full), "");
    assert_eq!(describe_cells("", "2024-01-01", DurationMode::Short), "");
}

#[test]
fn end_before_start_is_invalid() {
    assert_eq!(
        elapsed(d("2024-02-10"), d("2024-02-01"), DurationMode::Short),
        Elapsed::Invalid
    );
    assert_eq!(
        describe(d("2024-02-10"), d("2024-02-01"), DurationMode::Full),
        INVALID_DATES
    );
}

#[test]
fn unparseable_cell_is_invalid() {
    assert_eq!(
        describe_cells("10/02/2024", "2024-03-01", DurationMode::Short),
        INVALID_DATES
    );
}

#[test]
fn short_mode_counts_days_inclusively() {
    assert_eq!(describe(d("2024-01-01"), d("2024-01-01"), DurationMode::Short), "1 day");
    assert_eq!(describe(d("2024-01-01"), d("2024-01-10"), DurationMode::Short), "10 days");
    assert_eq!(describe(d("2024-01-01"), d("2024-01-29"), DurationMode::Short), "29 days");
}

#[test]
fn short_mode_decomposes_from_thirty_days() {
    assert_eq!(
        elapsed(d("2024-01-01"), d("2024-01-30"), DurationMode::Short),
        Elapsed::Span {
            years: 0,
            months: 0,
            days: 30
        }
    );
    assert_eq!(
        describe(d("2024-01-01"), d("2024-02-15"), DurationMode::Short),
        "1 month, 15 days"
    );
}

#[test]
fn full_mode_never_short_circuits() {
    assert_eq!(
        elapsed(d("2024-05-05"), d("2024-05-05"), DurationMode::Full),
        Elapsed::Span {
            years: 0,
            months: 0,
            days: 1
        }
    );
    assert_eq!(describe(d("2024-05-05"), d("2024-05-05"), DurationMode::Full), "1 day");
}

#[test]
fn full_mode_decomposition_is_exact() {
    assert_eq!(
        describe(d("2023-01-15"), d("2024-03-20"), DurationMode::Full),
        "1 year, 2 months, 6 days"
    );
    assert_eq!(
        describe(d("2023-01-01"), d("2025-01-01"), DurationMode::Full),
        "2 years, 1 day"
    );
}

#[test]
fn month_steps_roll_over_short_months() {
    // Jan 31 + 1 month lands on Mar 3 in 2023
    assert_eq!(
        describe(d("2023-01-31"), d("2023-03-02"), DurationMode::Full),
        "31 days"
    );
    assert_eq!(
        describe(d("2023-01-31"), d("2023-03-03"), DurationMode::Full),
        "1 month, 1 day"
    );
}
