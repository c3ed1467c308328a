// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar primitives shared by the accrual calculator and the booking engine.

use crate::error::DomainError;
use crate::holidays::HolidaySet;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, Weekday};

/// Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Legacy leap-year rule that only checks divisibility by four.
///
/// Older month grids were rendered with this rule. It disagrees with the
/// Gregorian rule for century years such as 1900 and 2100 and must not be
/// used for accrual.
#[must_use]
pub const fn is_leap_year_simplified(year: i32) -> bool {
    year % 4 == 0
}

/// Number of days in the given month (28..=31).
#[must_use]
pub const fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Orders two dates so the earlier one comes first.
#[must_use]
pub fn ordered(a: Date, b: Date) -> (Date, Date) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Inclusive number of calendar days between two dates, in either order.
#[must_use]
pub fn span_length(a: Date, b: Date) -> u32 {
    let (start, end) = ordered(a, b);
    (end.to_julian_day() - start.to_julian_day()).unsigned_abs() + 1
}

/// Ascending iterator over every calendar day of an inclusive span.
#[derive(Debug, Clone)]
pub struct DateSpan {
    next: Option<Date>,
    last: Date,
}

impl Iterator for DateSpan {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current: Date = self.next?;
        self.next = if current < self.last {
            current.next_day()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: usize = self.next.map_or(0, |next| {
            usize::try_from(span_length(next, self.last)).unwrap_or(usize::MAX)
        });
        (remaining, Some(remaining))
    }
}

/// Enumerates every day from `start` to `end` inclusive.
///
/// The endpoints are swapped when given in reverse, so the sequence is always
/// ascending. Each call returns a fresh iterator.
#[must_use]
pub fn enumerate_dates(start: Date, end: Date) -> DateSpan {
    let (first, last) = ordered(start, end);
    DateSpan {
        next: Some(first),
        last,
    }
}

/// Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Classification of a calendar day for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    /// Ordinary working day.
    Weekday,
    /// Saturday or Sunday that is not a public holiday.
    Weekend,
    /// Public holiday. Takes precedence over `Weekend`.
    Holiday,
}

/// Classifies `date` against the supplied holiday set.
#[must_use]
pub fn day_kind(date: Date, holidays: &HolidaySet) -> DayKind {
    if holidays.contains(date) {
        DayKind::Holiday
    } else if is_weekend(date) {
        DayKind::Weekend
    } else {
        DayKind::Weekday
    }
}

/// A month of a specific year together with its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthInfo {
    pub month: Month,
    pub days: u8,
}

/// The twelve months of `year` in calendar order.
#[must_use]
pub fn months_of_year(year: i32) -> Vec<MonthInfo> {
    let mut months: Vec<MonthInfo> = Vec::with_capacity(12);
    let mut month: Month = Month::January;
    for _ in 0..12 {
        months.push(MonthInfo {
            month,
            days: days_in_month(year, month),
        });
        month = month.next();
    }
    months
}

/// Adds whole calendar months to a date.
///
/// When the target month is shorter than the source day, the result is
/// clamped to the last day of the target month (31 August + 6 months is
/// the last day of February).
///
/// # Errors
///
/// Returns an error if the result falls outside the supported date range.
pub fn add_months(date: Date, months: u8) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {months} months to {date}"),
    };

    let month_index: i32 = i32::from(date.month() as u8) - 1 + i32::from(months);
    let year: i32 = date
        .year()
        .checked_add(month_index.div_euclid(12))
        .ok_or_else(overflow)?;
    let month_number: u8 = u8::try_from(month_index.rem_euclid(12) + 1).map_err(|_| overflow())?;
    let month: Month = Month::try_from(month_number).map_err(|_| overflow())?;
    let day: u8 = date.day().min(days_in_month(year, month));

    Date::from_calendar_date(year, month, day).map_err(|_| overflow())
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(
        value,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.to_string()
}

/// Current UTC calendar date.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
