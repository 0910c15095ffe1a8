//! Calendar window helpers.
//!
//! Every ledger window and analytics rollup works over closed date
//! intervals, usually whole calendar months.

use chrono::{Datelike, Months, NaiveDate};

/// First and last day of a calendar month, as a closed interval.
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| panic!("invalid month {year}-{month:02}"));
    let end = start + Months::new(1) - chrono::Days::new(1);
    (start, end)
}

/// Bounds of the month containing `date`.
pub fn month_of(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    month_bounds(date.year(), date.month())
}

/// Every date in the closed interval `[start, end]`, ascending.
///
/// Empty when `start > end`.
pub fn days_in(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// First days of the trailing `months_back + 1` months ending at the month
/// containing `today`, ascending.
pub fn trailing_months(today: NaiveDate, months_back: u32) -> Vec<NaiveDate> {
    let current = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .expect("first of month is always valid");
    (0..=months_back)
        .rev()
        .map(|back| current - Months::new(back))
        .collect()
}

/// Short human label for a month, e.g. "Jan 2024".
pub fn month_label(first_day: NaiveDate) -> String {
    first_day.format("%b %Y").to_string()
}
