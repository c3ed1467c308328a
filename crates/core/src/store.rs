// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capabilities the booking engine needs from storage.
//!
//! The engine never owns persistent storage. Implementations are injected
//! by the caller (the SQLite backend in production, in-memory fakes in
//! tests).

use crate::request::{DeleteRangesRequest, SaveRangesRequest};
use vacation_domain::{
    CommittedRangeSet, Employee, EmployeeDraft, EmployeeId, HolidaySet, ServerRange,
};

/// An employee snapshot together with every committed range set.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee: Employee,
    pub committed: Vec<CommittedRangeSet>,
}

impl EmployeeRecord {
    /// Every committed range of `year`, regardless of status, ordered by start.
    #[must_use]
    pub fn server_ranges_for(&self, year: i32) -> Vec<ServerRange> {
        let mut ranges: Vec<ServerRange> = self
            .committed
            .iter()
            .filter(|set| set.year == year)
            .flat_map(|set| set.ranges.iter().copied())
            .collect();
        ranges.sort();
        ranges
    }
}

/// Read and write access to committed vacation data.
pub trait VacationStore {
    type Error: std::error::Error;

    /// Fetches every employee with their committed range sets.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn fetch_employees(&mut self) -> Result<Vec<EmployeeRecord>, Self::Error>;

    /// Fetches the public holiday set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn fetch_holidays(&mut self) -> Result<HolidaySet, Self::Error>;

    /// Fetches the committed ranges of one employee and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn fetch_server_ranges(
        &mut self,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<Vec<ServerRange>, Self::Error>;

    /// Commits ranges for one employee and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the ranges are rejected or cannot be stored.
    /// Nothing is stored on error.
    fn save_ranges(&mut self, request: &SaveRangesRequest) -> Result<(), Self::Error>;

    /// Removes committed ranges for one employee and year.
    ///
    /// # Errors
    ///
    /// Returns an error if any requested range is not committed or the store
    /// cannot be written. Nothing is removed on error.
    fn delete_ranges(&mut self, request: &DeleteRangesRequest) -> Result<(), Self::Error>;
}

/// Employee records by identifier.
pub trait EmployeeRepository {
    type Error: std::error::Error;

    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Option<Employee>, Self::Error>;

    /// Stores a new employee and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee cannot be stored.
    fn add_employee(&mut self, draft: EmployeeDraft) -> Result<Employee, Self::Error>;

    /// Replaces an existing employee, positions included.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or cannot be stored.
    fn update_employee(&mut self, employee: &Employee) -> Result<(), Self::Error>;

    /// Removes an employee and everything committed for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or cannot be removed.
    fn delete_employee(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error>;
}
