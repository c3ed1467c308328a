// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee position history.
//!
//! An employee holds an ordered sequence of position intervals, each with its
//! own annual base and additional vacation rates. At most one interval is
//! open-ended (the current one).

use crate::calendar::today;
use crate::error::DomainError;
use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use time::Date;

/// A period during which an employee held one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInterval {
    /// First day in the position.
    pub from_date: Date,
    /// Last day in the position. `None` means the position is current.
    pub to_date: Option<Date>,
    /// Position title.
    pub position: String,
    /// Base vacation days earned per year in this position.
    pub base_days_per_year: f64,
    /// Additional vacation days earned per year. `None` defers to the
    /// position-rate table.
    pub additional_days_per_year: Option<f64>,
}

impl PositionInterval {
    /// Creates a new `PositionInterval`.
    #[must_use]
    pub fn new(
        from_date: Date,
        to_date: Option<Date>,
        position: impl Into<String>,
        base_days_per_year: f64,
        additional_days_per_year: Option<f64>,
    ) -> Self {
        Self {
            from_date,
            to_date,
            position: position.into(),
            base_days_per_year,
            additional_days_per_year,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.to_date.is_none()
    }

    /// Whether `to_date` precedes `from_date`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.to_date.is_some_and(|to| to < self.from_date)
    }

    /// Whether `date` lies in `[from_date, to_date]`, treating an open end as
    /// unbounded.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.from_date && self.to_date.is_none_or(|to| date <= to)
    }
}

/// Snapshot of an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub display_name: String,
    pub hire_date: Date,
    /// Base days already consumed.
    pub used_base_days: f64,
    /// Additional days already consumed.
    pub used_additional_days: f64,
    /// Position history in stored order.
    pub positions: Vec<PositionInterval>,
}

impl Employee {
    /// Interval governing `date`. See [`position_at`].
    #[must_use]
    pub fn position_at(&self, date: Date) -> Option<&PositionInterval> {
        position_at(self, date)
    }

    /// Title of the interval governing today, if any.
    #[must_use]
    pub fn current_title(&self) -> Option<&str> {
        current_position(self).map(|interval| interval.position.as_str())
    }
}

/// Employee fields before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub display_name: String,
    pub hire_date: Date,
    pub used_base_days: f64,
    pub used_additional_days: f64,
    pub positions: Vec<PositionInterval>,
}

impl EmployeeDraft {
    /// Attaches an identifier.
    #[must_use]
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            display_name: self.display_name,
            hire_date: self.hire_date,
            used_base_days: self.used_base_days,
            used_additional_days: self.used_additional_days,
            positions: self.positions,
        }
    }
}

/// Returns the interval whose span contains `date`.
///
/// When malformed data leaves several intervals covering the same day, the
/// first one in stored order wins. Returns `None` when no interval covers the
/// date, e.g. before hire.
#[must_use]
pub fn position_at(employee: &Employee, date: Date) -> Option<&PositionInterval> {
    employee
        .positions
        .iter()
        .find(|interval| interval.contains(date))
}

/// `position_at(employee, today)`.
#[must_use]
pub fn current_position(employee: &Employee) -> Option<&PositionInterval> {
    position_at(employee, today())
}

/// Validates a position history.
///
/// Rules:
/// - no interval ends before it starts
/// - rates are finite and non-negative
/// - intervals are ordered by `from_date`
/// - intervals do not overlap, so at most one is open and it comes last
///
/// # Errors
///
/// Returns `InvalidPositionHistory` naming the first offending interval.
pub fn validate_position_history(positions: &[PositionInterval]) -> Result<(), DomainError> {
    for (index, interval) in positions.iter().enumerate() {
        if interval.is_inverted() {
            return Err(DomainError::InvalidPositionHistory {
                index,
                reason: format!(
                    "ends before it starts on {}",
                    interval.from_date
                ),
            });
        }

        let rates_valid: bool = is_valid_rate(interval.base_days_per_year)
            && interval.additional_days_per_year.is_none_or(is_valid_rate);
        if !rates_valid {
            return Err(DomainError::InvalidPositionHistory {
                index,
                reason: String::from("rates must be finite and non-negative"),
            });
        }

        if index == 0 {
            continue;
        }
        let previous: &PositionInterval = &positions[index - 1];

        if interval.from_date < previous.from_date {
            return Err(DomainError::InvalidPositionHistory {
                index,
                reason: format!(
                    "starts on {} before the preceding interval starts on {}",
                    interval.from_date, previous.from_date
                ),
            });
        }

        match previous.to_date {
            None => {
                return Err(DomainError::InvalidPositionHistory {
                    index,
                    reason: String::from("follows an open-ended interval"),
                });
            }
            Some(previous_end) if previous_end >= interval.from_date => {
                return Err(DomainError::InvalidPositionHistory {
                    index,
                    reason: format!(
                        "starts on {} while the preceding interval runs until {previous_end}",
                        interval.from_date
                    ),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}
