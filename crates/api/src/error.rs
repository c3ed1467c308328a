// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use vacation_booking::{CoreError, LockReason};
use vacation_domain::DomainError;
use vacation_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and represent
/// the API contract. Lower layers are translated explicitly so their
/// variants never leak to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with stored data or a request in flight.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPositionHistory { index, reason } => ApiError::InvalidInput {
            field: String::from("positions"),
            message: format!("Interval {index}: {reason}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("ranges"),
            message: format!("Range starts on {start} but ends on {end}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::InvalidRangeStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown range status '{status}'"),
        },
        DomainError::InvalidEmployee(msg) => ApiError::InvalidInput {
            field: String::from("employee"),
            message: msg,
        },
    }
}

/// Translates a booking engine error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotEditable { reason } => ApiError::DomainRuleViolation {
            rule: String::from(lock_rule(reason)),
            message: reason.to_string(),
        },
        CoreError::EntitlementExceeded {
            requested,
            available,
        } => ApiError::DomainRuleViolation {
            rule: String::from("entitlement"),
            message: format!("{requested} days requested but only {available} available"),
        },
        CoreError::NothingToSave => ApiError::InvalidInput {
            field: String::from("ranges"),
            message: String::from("There are no ranges to save"),
        },
        CoreError::RequestInFlight(employee_id) => ApiError::Conflict {
            message: format!("A request for employee {employee_id} is still pending"),
        },
        CoreError::DragInProgress => ApiError::Conflict {
            message: String::from("A selection drag is in progress"),
        },
        CoreError::UnknownEmployee(employee_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist"),
        },
        CoreError::UnknownRange(range_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Range"),
            message: format!("Local range {range_id} does not exist"),
        },
        CoreError::UnknownServerRange { start, end } => ApiError::ResourceNotFound {
            resource_type: String::from("Range"),
            message: format!("No committed range from {start} to {end}"),
        },
        CoreError::PersistenceFailure(reason) => ApiError::Internal {
            message: format!("Persistence failed: {reason}"),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::InvalidRequest(message) => ApiError::InvalidInput {
            field: String::from("ranges"),
            message,
        },
        PersistenceError::Conflict(message) => ApiError::Conflict { message },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

const fn lock_rule(reason: LockReason) -> &'static str {
    match reason {
        LockReason::NotOwner => "owner_only",
        LockReason::OutsideYear => "viewed_year",
        LockReason::BeforeHire => "after_hire",
        LockReason::Probation => "probation",
        LockReason::ServerConfirmed => "server_confirmed",
        LockReason::LocallySelected => "distinct_ranges",
    }
}
