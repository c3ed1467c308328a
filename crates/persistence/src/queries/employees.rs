// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::debug;
use vacation_domain::{Employee, EmployeeId};

use crate::data_models::{EmployeeRow, PositionIntervalRow};
use crate::diesel_schema::{employees, position_intervals};
use crate::error::PersistenceError;

/// Loads every employee with their position history, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    let interval_rows: Vec<PositionIntervalRow> = position_intervals::table
        .order((
            position_intervals::employee_id.asc(),
            position_intervals::sequence_index.asc(),
        ))
        .select(PositionIntervalRow::as_select())
        .load(conn)?;

    let mut intervals_by_employee: HashMap<i64, Vec<PositionIntervalRow>> = HashMap::new();
    for interval in interval_rows {
        intervals_by_employee
            .entry(interval.employee_id)
            .or_default()
            .push(interval);
    }

    debug!(count = rows.len(), "Loaded employees");

    rows.into_iter()
        .map(|row| {
            let intervals: Vec<PositionIntervalRow> = intervals_by_employee
                .remove(&row.employee_id)
                .unwrap_or_default();
            row.into_employee(intervals)
        })
        .collect()
}

/// Loads one employee with their position history.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
/// Returns `Ok(None)` if the employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Option<Employee>, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        debug!(employee_id = %employee_id, "Employee not found");
        return Ok(None);
    };

    let intervals: Vec<PositionIntervalRow> = position_intervals::table
        .filter(position_intervals::employee_id.eq(employee_id.value()))
        .order(position_intervals::sequence_index.asc())
        .select(PositionIntervalRow::as_select())
        .load(conn)?;

    row.into_employee(intervals).map(Some)
}

/// Whether an employee row exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn employee_exists(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
