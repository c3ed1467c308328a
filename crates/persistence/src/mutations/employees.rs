// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vacation_domain::{Employee, EmployeeDraft, EmployeeId, PositionInterval, format_iso_date};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployeeRow, NewPositionIntervalRow};
use crate::diesel_schema::{employees, position_intervals};
use crate::error::PersistenceError;

/// Inserts an employee and their position history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `draft` - The employee fields
///
/// # Returns
///
/// The assigned employee identifier.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    draft: &EmployeeDraft,
) -> Result<EmployeeId, PersistenceError> {
    let row: NewEmployeeRow<'_> = NewEmployeeRow {
        display_name: &draft.display_name,
        hire_date: format_iso_date(draft.hire_date),
        used_base_days: draft.used_base_days,
        used_additional_days: draft.used_additional_days,
    };
    diesel::insert_into(employees::table)
        .values(&row)
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;
    insert_positions(conn, employee_id, &draft.positions)?;

    info!(
        employee_id,
        positions = draft.positions.len(),
        "Created employee"
    );
    Ok(EmployeeId::new(employee_id))
}

/// Replaces an employee's fields and position history.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or a database error.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let employee_id: i64 = employee.id.value();

    let updated: usize = diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
        .set((
            employees::display_name.eq(&employee.display_name),
            employees::hire_date.eq(format_iso_date(employee.hire_date)),
            employees::used_base_days.eq(employee.used_base_days),
            employees::used_additional_days.eq(employee.used_additional_days),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("employee {employee_id}")));
    }

    diesel::delete(
        position_intervals::table.filter(position_intervals::employee_id.eq(employee_id)),
    )
    .execute(conn)?;
    insert_positions(conn, employee_id, &employee.positions)?;

    info!(employee_id, "Updated employee");
    Ok(())
}

/// Deletes an employee. Positions and committed ranges cascade.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or a database error.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(employees::table.filter(employees::employee_id.eq(employee_id.value())))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("employee {employee_id}")));
    }

    info!(employee_id = %employee_id, "Deleted employee");
    Ok(())
}

fn insert_positions(
    conn: &mut SqliteConnection,
    employee_id: i64,
    positions: &[PositionInterval],
) -> Result<(), PersistenceError> {
    if positions.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewPositionIntervalRow<'_>> = positions
        .iter()
        .enumerate()
        .map(|(index, interval)| NewPositionIntervalRow::from_interval(employee_id, index, interval))
        .collect::<Result<_, _>>()?;

    diesel::insert_into(position_intervals::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}
