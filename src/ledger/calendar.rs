//! Calendar arithmetic shared by the amortizer, the merger and the advisor.
//!
//! All analytics are calendar-day granular, and month arithmetic clamps the
//! day to the length of the target month.

use chrono::{Datelike, Duration, NaiveDate};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    let day = days_in_month(start.year(), start.month());
    start.with_day(day).unwrap_or(start)
}

/// Zero-based month index since year 0, handy for month differences.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

/// Number of month boundaries crossed going from `from` to `to`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    month_index(to) - month_index(from)
}

/// Whole calendar months elapsed from `from` to `to`; the final month only
/// counts once its day-of-month has been reached.
pub fn whole_months_elapsed(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months = months_between(from, to);
    // the anniversary is clamped onto short months, so compare dates instead of days
    if months > 0 && shift_month(from, months) > to {
        months -= 1;
    }
    months.max(0)
}

/// Whole calendar years elapsed from `from` to `to`.
pub fn whole_years_elapsed(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if years > 0 && shift_year(from, years) > to {
        years -= 1;
    }
    years.max(0)
}

pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

pub fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

/// Iterator over month starts from the month of `from` through the month of
/// `through`, both inclusive.
#[derive(Debug, Clone)]
pub struct MonthStarts {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl MonthStarts {
    pub fn new(from: NaiveDate, through: NaiveDate) -> Self {
        let first = month_start(from);
        let last = month_start(through);
        Self {
            next: (first <= last).then_some(first),
            last,
        }
    }
}

impl Iterator for MonthStarts {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let following = shift_month(current, 1);
        self.next = (following <= self.last && following > current).then_some(following);
        Some(current)
    }
}
