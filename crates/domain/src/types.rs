// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::span_length;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Identifier of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Approval status of a committed range set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    /// Submitted by the employee, not yet approved.
    #[default]
    Draft,
    /// Approved by management.
    Approved,
}

impl RangeStatus {
    /// Converts this status to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
        }
    }
}

impl FromStr for RangeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            _ => Err(DomainError::InvalidRangeStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted, confirmed date range. Immutable from the client's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerRange {
    start_date: Date,
    end_date: Date,
}

impl ServerRange {
    /// Creates a new `ServerRange`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_date` is before `start_date`.
    pub fn new(start_date: Date, end_date: Date) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Whether `date` falls inside the inclusive range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the two inclusive spans share at least one day.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Inclusive number of calendar days covered.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        span_length(self.start_date, self.end_date)
    }
}

/// A committed range set as persisted for one employee and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedRangeSet {
    /// The owning employee.
    pub employee_id: EmployeeId,
    /// The calendar year the ranges belong to.
    pub year: i32,
    /// Approval status shared by every range in the set.
    pub status: RangeStatus,
    /// The committed ranges, ordered by start date.
    pub ranges: Vec<ServerRange>,
    /// Sum of inclusive day counts over `ranges`.
    pub total_duration: u32,
}

impl CommittedRangeSet {
    /// Builds a set, deriving `total_duration` from the ranges.
    #[must_use]
    pub fn new(
        employee_id: EmployeeId,
        year: i32,
        status: RangeStatus,
        mut ranges: Vec<ServerRange>,
    ) -> Self {
        ranges.sort();
        let total_duration: u32 = ranges.iter().map(ServerRange::day_count).sum();
        Self {
            employee_id,
            year,
            status,
            ranges,
            total_duration,
        }
    }
}
