// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod accrual;
mod calendar;
mod error;
mod holidays;
mod position_history;
mod position_rates;
mod types;

#[cfg(test)]
mod tests;

pub use accrual::{
    AccrualMode, AccrualResult, DEFAULT_BASE_DAYS_PER_YEAR, calculate_accrual,
    calculate_vacation_days, calculate_vacation_days_simple, project_entitlement,
};
pub use calendar::{
    DateSpan, DayKind, MonthInfo, add_months, day_kind, days_in_month, enumerate_dates,
    format_iso_date, is_leap_year, is_leap_year_simplified, is_weekend, months_of_year,
    ordered, parse_iso_date, span_length, today,
};
pub use error::DomainError;
pub use holidays::{HolidaySet, is_public_holiday};
pub use position_history::{
    Employee, EmployeeDraft, PositionInterval, current_position, position_at,
    validate_position_history,
};
pub use position_rates::PositionRateTable;
pub use types::{CommittedRangeSet, EmployeeId, RangeStatus, ServerRange};
