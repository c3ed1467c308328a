// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Committed range writes.
//!
//! Ranges are grouped into one set per (employee, year, status). Every write
//! recomputes the set's `total_duration`, and a set left without ranges is
//! removed.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, info};
use vacation_booking::{DeleteRangesRequest, RangePayload, SaveRangesRequest};
use vacation_domain::ServerRange;

use crate::backend::PersistenceBackend;
use crate::data_models::RangeRow;
use crate::diesel_schema::{vacation_range_sets, vacation_ranges};
use crate::error::PersistenceError;
use crate::queries::employees::employee_exists;
use crate::queries::vacations::{find_range_rows, find_server_ranges, find_set_id};

/// Appends ranges to the employee's set for the request's year and status.
///
/// Ranges must be well-formed, lie inside the year, and overlap neither
/// each other nor anything already committed for that employee and year.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request` - The ranges to commit
///
/// # Errors
///
/// Returns an error if:
/// - The request holds no ranges or a malformed range (`InvalidRequest`)
/// - The employee does not exist (`NotFound`)
/// - A range overlaps another range (`Conflict`)
/// - A database operation fails
pub fn save_ranges(
    conn: &mut SqliteConnection,
    request: &SaveRangesRequest,
) -> Result<(), PersistenceError> {
    if request.ranges.is_empty() {
        return Err(PersistenceError::InvalidRequest(String::from(
            "no ranges to save",
        )));
    }
    if !employee_exists(conn, request.employee_id)? {
        return Err(PersistenceError::NotFound(format!(
            "employee {}",
            request.employee_id
        )));
    }

    let incoming: Vec<ServerRange> = parse_ranges(&request.ranges, request.year)?;
    let committed: Vec<ServerRange> =
        find_server_ranges(conn, request.employee_id, request.year)?;
    check_overlaps(&committed, &incoming)?;

    let set_id: i64 = match find_set_id(conn, request.employee_id, request.year, request.status)?
    {
        Some(set_id) => set_id,
        None => {
            diesel::insert_into(vacation_range_sets::table)
                .values((
                    vacation_range_sets::employee_id.eq(request.employee_id.value()),
                    vacation_range_sets::year.eq(request.year),
                    vacation_range_sets::status.eq(request.status.as_str()),
                    vacation_range_sets::total_duration.eq(0),
                ))
                .execute(conn)?;
            let set_id: i64 = conn.get_last_insert_rowid()?;
            debug!(set_id, "Created vacation range set");
            set_id
        }
    };

    let rows: Vec<_> = request
        .ranges
        .iter()
        .map(|range| {
            (
                vacation_ranges::set_id.eq(set_id),
                vacation_ranges::start_date.eq(&range.start_date),
                vacation_ranges::end_date.eq(&range.end_date),
            )
        })
        .collect();
    diesel::insert_into(vacation_ranges::table)
        .values(rows)
        .execute(conn)?;

    refresh_set(conn, set_id)?;

    info!(
        employee_id = %request.employee_id,
        year = request.year,
        status = %request.status,
        ranges = incoming.len(),
        "Saved vacation ranges"
    );
    Ok(())
}

/// Removes exactly the requested committed ranges of one employee and year.
///
/// # Errors
///
/// Returns `NotFound` if any requested range is not committed, in which case
/// nothing is removed once the surrounding transaction rolls back.
/// Returns `InvalidRequest` for an empty or malformed request.
pub fn delete_ranges(
    conn: &mut SqliteConnection,
    request: &DeleteRangesRequest,
) -> Result<(), PersistenceError> {
    if request.ranges.is_empty() {
        return Err(PersistenceError::InvalidRequest(String::from(
            "no ranges to delete",
        )));
    }

    let targets: Vec<ServerRange> = parse_ranges(&request.ranges, request.year)?;
    let rows: Vec<RangeRow> = find_range_rows(conn, request.employee_id, request.year)?;

    let mut doomed: Vec<i64> = Vec::new();
    let mut touched_sets: BTreeSet<i64> = BTreeSet::new();
    for target in &targets {
        let matches: Vec<&RangeRow> = rows
            .iter()
            .filter(|row| row.to_server_range().is_ok_and(|stored| stored == *target))
            .collect();
        if matches.is_empty() {
            return Err(PersistenceError::NotFound(format!(
                "committed range {} to {} for employee {}",
                target.start_date(),
                target.end_date(),
                request.employee_id
            )));
        }
        for row in matches {
            doomed.push(row.range_id);
            touched_sets.insert(row.set_id);
        }
    }

    let deleted: usize =
        diesel::delete(vacation_ranges::table.filter(vacation_ranges::range_id.eq_any(doomed)))
            .execute(conn)?;
    for set_id in touched_sets {
        refresh_set(conn, set_id)?;
    }

    info!(
        employee_id = %request.employee_id,
        year = request.year,
        deleted,
        "Deleted vacation ranges"
    );
    Ok(())
}

fn parse_ranges(payloads: &[RangePayload], year: i32) -> Result<Vec<ServerRange>, PersistenceError> {
    payloads
        .iter()
        .map(|payload| {
            let range: ServerRange = payload
                .to_server_range()
                .map_err(|e| PersistenceError::InvalidRequest(e.to_string()))?;
            if range.start_date().year() != year || range.end_date().year() != year {
                return Err(PersistenceError::InvalidRequest(format!(
                    "range {} to {} is outside {year}",
                    range.start_date(),
                    range.end_date()
                )));
            }
            Ok(range)
        })
        .collect()
}

fn check_overlaps(committed: &[ServerRange], incoming: &[ServerRange]) -> Result<(), PersistenceError> {
    for (index, range) in incoming.iter().enumerate() {
        let (start, end) = (range.start_date(), range.end_date());
        if let Some(existing) = committed.iter().find(|c| c.overlaps(start, end)) {
            return Err(PersistenceError::Conflict(format!(
                "range {start} to {end} overlaps committed range {} to {}",
                existing.start_date(),
                existing.end_date()
            )));
        }
        if incoming[..index].iter().any(|other| other.overlaps(start, end)) {
            return Err(PersistenceError::Conflict(format!(
                "range {start} to {end} overlaps another range in the request"
            )));
        }
    }
    Ok(())
}

/// Recomputes a set's total duration, or removes the set if it is empty.
fn refresh_set(conn: &mut SqliteConnection, set_id: i64) -> Result<(), PersistenceError> {
    let rows: Vec<RangeRow> = vacation_ranges::table
        .filter(vacation_ranges::set_id.eq(set_id))
        .select(RangeRow::as_select())
        .load(conn)?;

    if rows.is_empty() {
        diesel::delete(vacation_range_sets::table.filter(vacation_range_sets::set_id.eq(set_id)))
            .execute(conn)?;
        debug!(set_id, "Removed empty vacation range set");
        return Ok(());
    }

    let mut total: u32 = 0;
    for row in &rows {
        total += row.to_server_range()?.day_count();
    }
    let total: i32 = i32::try_from(total)
        .map_err(|_| PersistenceError::CorruptRecord(format!("set {set_id} total overflows")))?;

    diesel::update(vacation_range_sets::table.filter(vacation_range_sets::set_id.eq(set_id)))
        .set(vacation_range_sets::total_duration.eq(total))
        .execute(conn)?;
    Ok(())
}
