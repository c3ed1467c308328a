// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the vacation planner.
//!
//! Employees, their position history, committed vacation ranges and public
//! holidays are stored in `SQLite` through Diesel. The schema is embedded
//! and migrated when a connection is opened.
//!
//! [`Persistence`] implements the booking engine's [`VacationStore`] and
//! [`EmployeeRepository`] capabilities. Every write runs in a transaction,
//! so a rejected request leaves the database untouched.
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which gives every caller its
//! own shared-cache in-memory database.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::{Connection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use vacation_booking::{
    DeleteRangesRequest, EmployeeRecord, EmployeeRepository, SaveRangesRequest, VacationStore,
};
use vacation_domain::{
    CommittedRangeSet, Employee, EmployeeDraft, EmployeeId, HolidaySet, ServerRange,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use backend::PersistenceBackend;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_vacation_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Lists every employee with their position history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read.
    pub fn list_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn)
    }

    /// Lists committed range sets, for one employee or for everyone.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read.
    pub fn list_committed_sets(
        &mut self,
        employee_id: Option<EmployeeId>,
    ) -> Result<Vec<CommittedRangeSet>, PersistenceError> {
        queries::vacations::list_committed_sets(&mut self.conn, employee_id)
    }

    /// Replaces the public holiday table wholesale.
    ///
    /// # Returns
    ///
    /// The number of holidays stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be rewritten. The previous
    /// holidays are kept in that case.
    pub fn replace_holidays(&mut self, holidays: &HolidaySet) -> Result<usize, PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::holidays::replace_holidays(conn, holidays)
        })
    }
}

impl VacationStore for Persistence {
    type Error = PersistenceError;

    fn fetch_employees(&mut self) -> Result<Vec<EmployeeRecord>, Self::Error> {
        let employees: Vec<Employee> = self.list_employees()?;
        let mut committed: Vec<CommittedRangeSet> = self.list_committed_sets(None)?;

        Ok(employees
            .into_iter()
            .map(|employee| {
                let (own, rest): (Vec<CommittedRangeSet>, Vec<CommittedRangeSet>) =
                    std::mem::take(&mut committed)
                        .into_iter()
                        .partition(|set| set.employee_id == employee.id);
                committed = rest;
                EmployeeRecord {
                    employee,
                    committed: own,
                }
            })
            .collect())
    }

    fn fetch_holidays(&mut self) -> Result<HolidaySet, Self::Error> {
        queries::holidays::list_holidays(&mut self.conn)
    }

    fn fetch_server_ranges(
        &mut self,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<Vec<ServerRange>, Self::Error> {
        queries::vacations::find_server_ranges(&mut self.conn, employee_id, year)
    }

    fn save_ranges(&mut self, request: &SaveRangesRequest) -> Result<(), Self::Error> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::vacations::save_ranges(conn, request)
        })
    }

    fn delete_ranges(&mut self, request: &DeleteRangesRequest) -> Result<(), Self::Error> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::vacations::delete_ranges(conn, request)
        })
    }
}

impl EmployeeRepository for Persistence {
    type Error = PersistenceError;

    fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Option<Employee>, Self::Error> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    fn add_employee(&mut self, draft: EmployeeDraft) -> Result<Employee, Self::Error> {
        let employee_id: EmployeeId = self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::employees::insert_employee(conn, &draft)
        })?;
        Ok(draft.into_employee(employee_id))
    }

    fn update_employee(&mut self, employee: &Employee) -> Result<(), Self::Error> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::employees::update_employee(conn, employee)
        })
    }

    fn delete_employee(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::employees::delete_employee(conn, employee_id)
        })
    }
}
