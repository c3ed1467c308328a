// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation and calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A position interval is malformed or conflicts with its neighbours.
    #[error("Invalid position history at interval {index}: {reason}")]
    InvalidPositionHistory {
        /// Zero-based index of the offending interval in stored order.
        index: usize,
        /// Description of what is wrong with the interval.
        reason: String,
    },
    /// Failed to parse date from string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A date range ends before it starts.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The range start.
        start: Date,
        /// The range end.
        end: Date,
    },
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Range status string is not recognised.
    #[error("Invalid range status: {0}")]
    InvalidRangeStatus(String),
    /// Employee field is empty or invalid.
    #[error("Invalid employee: {0}")]
    InvalidEmployee(String),
}
