// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::warn;
use vacation_domain::{CommittedRangeSet, EmployeeId, RangeStatus, ServerRange};

use crate::data_models::{RangeRow, RangeSetRow};
use crate::diesel_schema::{vacation_range_sets, vacation_ranges};
use crate::error::PersistenceError;

/// Loads committed range sets, for one employee or for everyone.
///
/// Sets come back ordered by employee, year and status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_committed_sets(
    conn: &mut SqliteConnection,
    employee_id: Option<EmployeeId>,
) -> Result<Vec<CommittedRangeSet>, PersistenceError> {
    let mut set_query = vacation_range_sets::table
        .order((
            vacation_range_sets::employee_id.asc(),
            vacation_range_sets::year.asc(),
            vacation_range_sets::status.asc(),
        ))
        .select(RangeSetRow::as_select())
        .into_boxed();
    if let Some(employee_id) = employee_id {
        set_query = set_query.filter(vacation_range_sets::employee_id.eq(employee_id.value()));
    }
    let set_rows: Vec<RangeSetRow> = set_query.load(conn)?;

    let set_ids: Vec<i64> = set_rows.iter().map(|row| row.set_id).collect();
    let range_rows: Vec<RangeRow> = vacation_ranges::table
        .filter(vacation_ranges::set_id.eq_any(set_ids))
        .select(RangeRow::as_select())
        .load(conn)?;

    let mut ranges_by_set: HashMap<i64, Vec<ServerRange>> = HashMap::new();
    for row in &range_rows {
        ranges_by_set
            .entry(row.set_id)
            .or_default()
            .push(row.to_server_range()?);
    }

    set_rows
        .into_iter()
        .map(|row| {
            let status: RangeStatus = row.parsed_status()?;
            let ranges: Vec<ServerRange> = ranges_by_set.remove(&row.set_id).unwrap_or_default();
            let set: CommittedRangeSet =
                CommittedRangeSet::new(EmployeeId::new(row.employee_id), row.year, status, ranges);
            if i64::from(set.total_duration) != i64::from(row.total_duration) {
                warn!(
                    set_id = row.set_id,
                    stored = row.total_duration,
                    derived = set.total_duration,
                    "Stored total duration disagrees with ranges"
                );
            }
            Ok(set)
        })
        .collect()
}

/// Loads the rows of every committed range of one employee and year.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_range_rows(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
) -> Result<Vec<RangeRow>, PersistenceError> {
    Ok(vacation_ranges::table
        .inner_join(vacation_range_sets::table)
        .filter(vacation_range_sets::employee_id.eq(employee_id.value()))
        .filter(vacation_range_sets::year.eq(year))
        .order(vacation_ranges::start_date.asc())
        .select(RangeRow::as_select())
        .load(conn)?)
}

/// Every committed range of one employee and year, regardless of status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn find_server_ranges(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
) -> Result<Vec<ServerRange>, PersistenceError> {
    let mut ranges: Vec<ServerRange> = find_range_rows(conn, employee_id, year)?
        .iter()
        .map(RangeRow::to_server_range)
        .collect::<Result<_, _>>()?;
    ranges.sort();
    Ok(ranges)
}

/// The set holding `status` ranges for one employee and year, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_set_id(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
    status: RangeStatus,
) -> Result<Option<i64>, PersistenceError> {
    Ok(vacation_range_sets::table
        .filter(vacation_range_sets::employee_id.eq(employee_id.value()))
        .filter(vacation_range_sets::year.eq(year))
        .filter(vacation_range_sets::status.eq(status.as_str()))
        .select(vacation_range_sets::set_id)
        .first(conn)
        .optional()?)
}
