// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requests the booking engine hands to persistence.
//!
//! The payload types double as wire DTOs, so dates are carried as ISO
//! `YYYY-MM-DD` strings and field names are camelCase.

use crate::selection::VacationRange;
use serde::{Deserialize, Serialize};
use time::Date;
use vacation_domain::{
    DomainError, EmployeeId, RangeStatus, ServerRange, format_iso_date, parse_iso_date,
};

/// Identifier correlating a request with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a new `RequestId`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive date range as ISO date strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangePayload {
    pub start_date: String,
    pub end_date: String,
}

impl RangePayload {
    #[must_use]
    pub fn from_dates(start_date: Date, end_date: Date) -> Self {
        Self {
            start_date: format_iso_date(start_date),
            end_date: format_iso_date(end_date),
        }
    }

    /// Parses both endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed.
    pub fn parse(&self) -> Result<(Date, Date), DomainError> {
        Ok((
            parse_iso_date(&self.start_date)?,
            parse_iso_date(&self.end_date)?,
        ))
    }

    /// Parses the payload into a committed range.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or the end precedes the
    /// start.
    pub fn to_server_range(&self) -> Result<ServerRange, DomainError> {
        let (start, end) = self.parse()?;
        ServerRange::new(start, end)
    }
}

impl From<&VacationRange> for RangePayload {
    fn from(range: &VacationRange) -> Self {
        Self::from_dates(range.start_date, range.end_date)
    }
}

impl From<&ServerRange> for RangePayload {
    fn from(range: &ServerRange) -> Self {
        Self::from_dates(range.start_date(), range.end_date())
    }
}

/// Ranges to commit for one employee and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRangesRequest {
    pub employee_id: EmployeeId,
    pub year: i32,
    pub ranges: Vec<RangePayload>,
    #[serde(default)]
    pub status: RangeStatus,
}

/// Committed ranges to remove for one employee and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRangesRequest {
    pub employee_id: EmployeeId,
    pub year: i32,
    pub ranges: Vec<RangePayload>,
}

/// A request produced by a booking transition.
///
/// The caller executes it against a store and feeds the outcome back as
/// `RequestSucceeded` or `RequestFailed` carrying the same `request_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceRequest {
    Save {
        request_id: RequestId,
        payload: SaveRangesRequest,
    },
    Delete {
        request_id: RequestId,
        payload: DeleteRangesRequest,
    },
}

impl PersistenceRequest {
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Save { request_id, .. } | Self::Delete { request_id, .. } => *request_id,
        }
    }

    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        match self {
            Self::Save { payload, .. } => payload.employee_id,
            Self::Delete { payload, .. } => payload.employee_id,
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        match self {
            Self::Save { payload, .. } => payload.year,
            Self::Delete { payload, .. } => payload.year,
        }
    }
}
