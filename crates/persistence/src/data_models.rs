// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to domain values.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text.

use diesel::prelude::*;
use std::str::FromStr;
use time::Date;
use vacation_domain::{
    Employee, EmployeeId, PositionInterval, RangeStatus, ServerRange, format_iso_date,
    parse_iso_date,
};

use crate::diesel_schema::{
    employees, position_intervals, vacation_range_sets, vacation_ranges,
};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub display_name: String,
    pub hire_date: String,
    pub used_base_days: f64,
    pub used_additional_days: f64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub display_name: &'a str,
    pub hire_date: String,
    pub used_base_days: f64,
    pub used_additional_days: f64,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = position_intervals)]
pub struct PositionIntervalRow {
    pub employee_id: i64,
    pub from_date: String,
    pub to_date: Option<String>,
    pub position: String,
    pub base_days_per_year: f64,
    pub additional_days_per_year: Option<f64>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = position_intervals)]
pub struct NewPositionIntervalRow<'a> {
    pub employee_id: i64,
    pub sequence_index: i32,
    pub from_date: String,
    pub to_date: Option<String>,
    pub position: &'a str,
    pub base_days_per_year: f64,
    pub additional_days_per_year: Option<f64>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vacation_range_sets)]
pub struct RangeSetRow {
    pub set_id: i64,
    pub employee_id: i64,
    pub year: i32,
    pub status: String,
    pub total_duration: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vacation_ranges)]
pub struct RangeRow {
    pub range_id: i64,
    pub set_id: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Parses a stored ISO date, naming the column on failure.
pub fn parse_stored_date(value: &str, column: &str) -> Result<Date, PersistenceError> {
    parse_iso_date(value)
        .map_err(|e| PersistenceError::CorruptRecord(format!("{column}: {e}")))
}

impl EmployeeRow {
    /// Combines this row with its intervals, already in sequence order.
    pub fn into_employee(
        self,
        intervals: Vec<PositionIntervalRow>,
    ) -> Result<Employee, PersistenceError> {
        let positions: Vec<PositionInterval> = intervals
            .into_iter()
            .map(PositionIntervalRow::into_interval)
            .collect::<Result<_, _>>()?;

        Ok(Employee {
            id: EmployeeId::new(self.employee_id),
            hire_date: parse_stored_date(&self.hire_date, "employees.hire_date")?,
            display_name: self.display_name,
            used_base_days: self.used_base_days,
            used_additional_days: self.used_additional_days,
            positions,
        })
    }
}

impl PositionIntervalRow {
    pub fn into_interval(self) -> Result<PositionInterval, PersistenceError> {
        let to_date: Option<Date> = self
            .to_date
            .as_deref()
            .map(|value| parse_stored_date(value, "position_intervals.to_date"))
            .transpose()?;

        Ok(PositionInterval::new(
            parse_stored_date(&self.from_date, "position_intervals.from_date")?,
            to_date,
            self.position,
            self.base_days_per_year,
            self.additional_days_per_year,
        ))
    }
}

impl<'a> NewPositionIntervalRow<'a> {
    pub fn from_interval(
        employee_id: i64,
        sequence_index: usize,
        interval: &'a PositionInterval,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            employee_id,
            sequence_index: i32::try_from(sequence_index).map_err(|_| {
                PersistenceError::InvalidRequest(String::from("too many position intervals"))
            })?,
            from_date: format_iso_date(interval.from_date),
            to_date: interval.to_date.map(format_iso_date),
            position: &interval.position,
            base_days_per_year: interval.base_days_per_year,
            additional_days_per_year: interval.additional_days_per_year,
        })
    }
}

impl RangeSetRow {
    pub fn parsed_status(&self) -> Result<RangeStatus, PersistenceError> {
        RangeStatus::from_str(&self.status).map_err(|e| {
            PersistenceError::CorruptRecord(format!("vacation_range_sets.status: {e}"))
        })
    }
}

impl RangeRow {
    pub fn to_server_range(&self) -> Result<ServerRange, PersistenceError> {
        let start: Date = parse_stored_date(&self.start_date, "vacation_ranges.start_date")?;
        let end: Date = parse_stored_date(&self.end_date, "vacation_ranges.end_date")?;
        ServerRange::new(start, end)
            .map_err(|e| PersistenceError::CorruptRecord(format!("vacation_ranges: {e}")))
    }
}
