// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vacation_domain::HolidaySet;

use crate::diesel_schema::public_holidays;
use crate::error::PersistenceError;

/// Replaces the whole holiday table with `holidays`.
///
/// # Returns
///
/// The number of holidays stored.
///
/// # Errors
///
/// Returns an error if the delete or insert fails.
pub fn replace_holidays(
    conn: &mut SqliteConnection,
    holidays: &HolidaySet,
) -> Result<usize, PersistenceError> {
    diesel::delete(public_holidays::table).execute(conn)?;

    let rows: Vec<_> = holidays
        .to_iso_strings()
        .into_iter()
        .map(|date| public_holidays::holiday_date.eq(date))
        .collect();
    let inserted: usize = if rows.is_empty() {
        0
    } else {
        diesel::insert_into(public_holidays::table)
            .values(rows)
            .execute(conn)?
    };

    info!(count = inserted, "Replaced public holidays");
    Ok(inserted)
}
