// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation entitlement accrual.
//!
//! Two calculations are provided and selected explicitly by the caller:
//!
//! - **Exact**: walks the employee's tenure year by year, splitting each year
//!   at position changes and applying each interval's own rates.
//! - **Simple**: applies the rates of the position held on the reference date
//!   to the whole tenure. Cheaper and used for list views; diverges from the
//!   exact result whenever rates changed over time.
//!
//! Accrual runs through the day before the reference date. The reference day
//! itself has not been worked yet.

use crate::calendar::{days_in_month, span_length};
use crate::error::DomainError;
use crate::position_history::{Employee, PositionInterval, position_at, validate_position_history};
use crate::position_rates::PositionRateTable;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Base days per year assumed when no position governs the reference date.
pub const DEFAULT_BASE_DAYS_PER_YEAR: f64 = 28.0;

/// Which accrual calculation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccrualMode {
    /// Year-by-year integration over the position history.
    #[default]
    Exact,
    /// Current position's rates applied to the whole tenure.
    Simple,
}

/// Earned and available vacation days, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccrualResult {
    pub earned_base_days: f64,
    pub available_base_days: f64,
    pub earned_additional_days: f64,
    pub available_additional_days: f64,
    pub total_available_days: f64,
}

impl AccrualResult {
    /// All fields zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            earned_base_days: 0.0,
            available_base_days: 0.0,
            earned_additional_days: 0.0,
            available_additional_days: 0.0,
            total_available_days: 0.0,
        }
    }

    /// Nets usage off the raw earned totals and rounds every field.
    fn from_earned(employee: &Employee, earned_base: f64, earned_additional: f64) -> Self {
        let available_base: f64 = (earned_base - employee.used_base_days).max(0.0);
        let available_additional: f64 =
            (earned_additional - employee.used_additional_days).max(0.0);

        Self {
            earned_base_days: round2(earned_base),
            available_base_days: round2(available_base),
            earned_additional_days: round2(earned_additional),
            available_additional_days: round2(available_additional),
            total_available_days: round2(available_base + available_additional),
        }
    }
}

/// Runs the calculation selected by `mode`.
///
/// # Errors
///
/// Exact mode returns `InvalidPositionHistory` for malformed histories.
/// Simple mode never fails.
pub fn calculate_accrual(
    mode: AccrualMode,
    employee: &Employee,
    rates: &PositionRateTable,
    reference: Date,
) -> Result<AccrualResult, DomainError> {
    match mode {
        AccrualMode::Exact => calculate_vacation_days(employee, rates, reference),
        AccrualMode::Simple => Ok(calculate_vacation_days_simple(
            employee, rates, reference,
        )),
    }
}

/// Exact accrual as of `reference`.
///
/// For every calendar year from the hire year onwards, the year is
/// intersected with each position interval. Each resulting sub-period earns
/// `months_between * base / 12` base days and
/// `inclusive_days * additional / 365` additional days.
///
/// # Errors
///
/// Returns `InvalidPositionHistory` if the history fails validation.
pub fn calculate_vacation_days(
    employee: &Employee,
    rates: &PositionRateTable,
    reference: Date,
) -> Result<AccrualResult, DomainError> {
    validate_position_history(&employee.positions)?;

    let Some(last_day) = reference.previous_day() else {
        return Ok(AccrualResult::zero());
    };
    if last_day < employee.hire_date {
        return Ok(AccrualResult::zero());
    }

    let mut earned_base: f64 = 0.0;
    let mut earned_additional: f64 = 0.0;

    for year in employee.hire_date.year()..=last_day.year() {
        let year_start: Date = first_of_year(year)?.max(employee.hire_date);
        let year_end: Date = last_of_year(year)?.min(last_day);

        for interval in &employee.positions {
            let start: Date = year_start.max(interval.from_date);
            let end: Date = interval.to_date.map_or(year_end, |to| year_end.min(to));
            if start > end {
                continue;
            }

            earned_base += months_between(start, end) * (interval.base_days_per_year / 12.0);
            earned_additional += f64::from(span_length(start, end))
                * (additional_rate(interval, rates) / 365.0);
        }
    }

    Ok(AccrualResult::from_earned(
        employee,
        earned_base,
        earned_additional,
    ))
}

/// Simple accrual as of `reference`.
///
/// Uses the interval governing `reference` for both rates. Whole months
/// worked drive base days and inclusive days worked drive additional days.
/// Without a governing interval the base rate falls back to
/// [`DEFAULT_BASE_DAYS_PER_YEAR`] and the additional rate to zero.
#[must_use]
pub fn calculate_vacation_days_simple(
    employee: &Employee,
    rates: &PositionRateTable,
    reference: Date,
) -> AccrualResult {
    if reference < employee.hire_date {
        return AccrualResult::zero();
    }

    let current: Option<&PositionInterval> = position_at(employee, reference);

    let months_worked: u32 = whole_months_between(employee.hire_date, reference);
    let base_per_year: f64 =
        current.map_or(DEFAULT_BASE_DAYS_PER_YEAR, |interval| interval.base_days_per_year);
    let earned_base: f64 = f64::from(months_worked) * (base_per_year / 12.0);

    let days_worked: u32 = span_length(employee.hire_date, reference);
    let additional_per_year: f64 =
        current.map_or(0.0, |interval| additional_rate(interval, rates));
    let earned_additional: f64 = f64::from(days_worked) * (additional_per_year / 365.0);

    AccrualResult::from_earned(employee, earned_base, earned_additional)
}

/// Entitlement available for booking inside `year`.
///
/// For the current or a past year this is the accrual as of `today`. For a
/// future year it is the accrual as of 1 January of the following year, so
/// the whole viewed year counts as earned.
///
/// This is not "today's availability plus one annual allotment". Every year
/// between today and the viewed year accrues too, so a year two ahead counts
/// roughly three years of accrual on top of today's balance.
///
/// # Errors
///
/// Propagates accrual errors, or fails if the projected date overflows.
pub fn project_entitlement(
    mode: AccrualMode,
    employee: &Employee,
    rates: &PositionRateTable,
    today: Date,
    year: i32,
) -> Result<AccrualResult, DomainError> {
    let reference: Date = if year > today.year() {
        let next_year: i32 = year
            .checked_add(1)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("projecting entitlement past {year}"),
            })?;
        first_of_year(next_year)?
    } else {
        today
    };
    calculate_accrual(mode, employee, rates, reference)
}

fn additional_rate(interval: &PositionInterval, rates: &PositionRateTable) -> f64 {
    interval
        .additional_days_per_year
        .unwrap_or_else(|| rates.additional_days_for(&interval.position))
}

/// Fractional months covered by `[start, end]`.
///
/// Zero whole months between the two month indexes yields the covered share
/// of the start month. Otherwise the result is
/// `(whole_months - 1) + start_fraction + end_fraction`, where the start
/// fraction counts the start day through month end and the end fraction
/// counts the first day through the end day.
fn months_between(start: Date, end: Date) -> f64 {
    let whole_months: i32 = month_index(end) - month_index(start);
    let start_month_days: f64 = f64::from(days_in_month(start.year(), start.month()));

    if whole_months == 0 {
        return f64::from(end.day() - start.day() + 1) / start_month_days;
    }

    let start_fraction: f64 =
        f64::from(days_in_month(start.year(), start.month()) - start.day() + 1) / start_month_days;
    let end_fraction: f64 =
        f64::from(end.day()) / f64::from(days_in_month(end.year(), end.month()));

    f64::from(whole_months - 1) + start_fraction + end_fraction
}

/// Completed calendar months between two dates, never negative.
fn whole_months_between(start: Date, end: Date) -> u32 {
    let mut months: i32 = month_index(end) - month_index(start);
    if end.day() < start.day() {
        months -= 1;
    }
    u32::try_from(months.max(0)).unwrap_or(0)
}

fn month_index(date: Date) -> i32 {
    date.year() * 12 + i32::from(date.month() as u8)
}

fn first_of_year(year: i32) -> Result<Date, DomainError> {
    Date::from_calendar_date(year, Month::January, 1).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("building 1 January {year}: {e}"),
        }
    })
}

fn last_of_year(year: i32) -> Result<Date, DomainError> {
    Date::from_calendar_date(year, Month::December, 31).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("building 31 December {year}: {e}"),
        }
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
