// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Wire names are camelCase and dates are ISO `YYYY-MM-DD` strings. Range
//! writes reuse the booking engine's `SaveRangesRequest` and
//! `DeleteRangesRequest`, which already follow these conventions.

use serde::{Deserialize, Serialize};
use vacation_booking::RangePayload;
use vacation_domain::{
    AccrualResult, CommittedRangeSet, Employee, PositionInterval, RangeStatus, format_iso_date,
};

/// One interval of an employee's position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionIntervalInfo {
    pub from_date: String,
    /// Absent for the open-ended current position.
    #[serde(default)]
    pub to_date: Option<String>,
    pub position: String,
    pub base_days_per_year: f64,
    /// Absent to use the title's default rate.
    #[serde(default)]
    pub additional_days_per_year: Option<f64>,
}

impl From<&PositionInterval> for PositionIntervalInfo {
    fn from(interval: &PositionInterval) -> Self {
        Self {
            from_date: format_iso_date(interval.from_date),
            to_date: interval.to_date.map(format_iso_date),
            position: interval.position.clone(),
            base_days_per_year: interval.base_days_per_year,
            additional_days_per_year: interval.additional_days_per_year,
        }
    }
}

/// Earned and available days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualInfo {
    pub earned_base_days: f64,
    pub available_base_days: f64,
    pub earned_additional_days: f64,
    pub available_additional_days: f64,
    pub total_available_days: f64,
}

impl From<AccrualResult> for AccrualInfo {
    fn from(result: AccrualResult) -> Self {
        Self {
            earned_base_days: result.earned_base_days,
            available_base_days: result.available_base_days,
            earned_additional_days: result.earned_additional_days,
            available_additional_days: result.available_additional_days,
            total_available_days: result.total_available_days,
        }
    }
}

/// A committed range set as stored for one employee and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSetInfo {
    pub year: i32,
    pub status: RangeStatus,
    pub ranges: Vec<RangePayload>,
    pub total_duration: u32,
}

impl From<&CommittedRangeSet> for RangeSetInfo {
    fn from(set: &CommittedRangeSet) -> Self {
        Self {
            year: set.year,
            status: set.status,
            ranges: set.ranges.iter().map(RangePayload::from).collect(),
            total_duration: set.total_duration,
        }
    }
}

/// An employee with accrual and committed vacations attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub display_name: String,
    pub hire_date: String,
    /// Title of the open-ended position, if any.
    pub current_position: Option<String>,
    pub used_base_days: f64,
    pub used_additional_days: f64,
    pub positions: Vec<PositionIntervalInfo>,
    pub accrual: AccrualInfo,
    /// Set when accrual could not be computed and zero was reported instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_error: Option<String>,
    pub vacations: Vec<RangeSetInfo>,
}

impl EmployeeResponse {
    /// Builds a response from an employee and its computed accrual.
    #[must_use]
    pub fn new(
        employee: &Employee,
        accrual: AccrualResult,
        calculation_error: Option<String>,
        committed: &[CommittedRangeSet],
    ) -> Self {
        Self {
            id: employee.id.value(),
            display_name: employee.display_name.clone(),
            hire_date: format_iso_date(employee.hire_date),
            current_position: employee.current_title().map(String::from),
            used_base_days: employee.used_base_days,
            used_additional_days: employee.used_additional_days,
            positions: employee
                .positions
                .iter()
                .map(PositionIntervalInfo::from)
                .collect(),
            accrual: AccrualInfo::from(accrual),
            calculation_error,
            vacations: committed.iter().map(RangeSetInfo::from).collect(),
        }
    }
}

/// API response listing every employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEmployeesResponse {
    pub employees: Vec<EmployeeResponse>,
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub display_name: String,
    pub hire_date: String,
    /// Title of the position held from the hire date.
    pub position: String,
    #[serde(default)]
    pub used_base_days: f64,
    #[serde(default)]
    pub used_additional_days: f64,
}

/// API request to replace an employee's fields and position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub display_name: String,
    pub hire_date: String,
    pub used_base_days: f64,
    pub used_additional_days: f64,
    pub positions: Vec<PositionIntervalInfo>,
}

/// API response for a successful employee deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmployeeResponse {
    pub id: i64,
    pub message: String,
}

/// API response after committed ranges changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRangesResponse {
    pub employee_id: i64,
    pub year: i32,
    /// Every committed range of the employee and year after the change.
    pub ranges: Vec<RangePayload>,
    pub message: String,
}

/// API response listing public holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaysResponse {
    /// ISO dates in ascending order.
    pub holidays: Vec<String>,
}
