// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use vacation_domain::HolidaySet;

use crate::data_models::parse_stored_date;
use crate::diesel_schema::public_holidays;
use crate::error::PersistenceError;

/// Loads the public holiday table.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_holidays(conn: &mut SqliteConnection) -> Result<HolidaySet, PersistenceError> {
    let dates: Vec<String> = public_holidays::table
        .select(public_holidays::holiday_date)
        .order(public_holidays::holiday_date.asc())
        .load(conn)?;

    dates
        .iter()
        .map(|date| parse_stored_date(date, "public_holidays.holiday_date"))
        .collect()
}
