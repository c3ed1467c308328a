// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::selection::RangeId;
use time::Date;
use vacation_domain::{DomainError, EmployeeId};

/// Why a calendar cell cannot be edited by the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// The row belongs to someone other than the current user.
    NotOwner,
    /// The date lies outside the year being booked.
    OutsideYear,
    /// The date precedes the employee's hire date.
    BeforeHire,
    /// The date falls inside the post-hire probation window.
    Probation,
    /// The date is covered by a server-confirmed range.
    ServerConfirmed,
    /// The date already belongs to another local range.
    LocallySelected,
}

impl std::fmt::Display for LockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: &str = match self {
            Self::NotOwner => "row belongs to another employee",
            Self::OutsideYear => "date is outside the booking year",
            Self::BeforeHire => "date is before the hire date",
            Self::Probation => "date is inside the probation window",
            Self::ServerConfirmed => "date is already confirmed",
            Self::LocallySelected => "date is already selected",
        };
        write!(f, "{text}")
    }
}

/// Errors that can occur during booking transitions.
///
/// Every variant is scoped to a single employee and year. None of them
/// leave the booking state partially mutated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The targeted cell is locked for this session.
    #[error("Not editable: {reason}")]
    NotEditable {
        /// What locks the cell.
        reason: LockReason,
    },
    /// Accepting the selection would exceed the employee's entitlement.
    #[error("Selection of {requested} days exceeds the {available} days available")]
    EntitlementExceeded {
        /// Total days the selection would hold.
        requested: u32,
        /// Days the employee may book.
        available: f64,
    },
    /// Save was requested with no local ranges.
    #[error("Nothing to save")]
    NothingToSave,
    /// A save or delete for this employee has not completed yet.
    #[error("A persistence request is already in flight for employee {0}")]
    RequestInFlight(EmployeeId),
    /// The command cannot run while a drag gesture is active.
    #[error("A drag gesture is in progress")]
    DragInProgress,
    /// The employee is not part of the booking board.
    #[error("Unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    /// No local range carries this identifier.
    #[error("Unknown range: {0}")]
    UnknownRange(RangeId),
    /// The server range is not committed for this employee and year.
    #[error("No committed range from {start} to {end}")]
    UnknownServerRange {
        /// First day of the requested range.
        start: Date,
        /// Last day of the requested range.
        end: Date,
    },
    /// A save or delete request was rejected by persistence.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotEditable`] with the given reason.
    #[must_use]
    pub const fn locked(reason: LockReason) -> Self {
        Self::NotEditable { reason }
    }
}
