// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations over the persistence layer.
//!
//! Each operation validates its input, runs against [`Persistence`] and
//! returns a response DTO. `today` is passed in so accrual is reproducible.

use time::Date;
use tracing::{info, warn};
use vacation_booking::{
    CoreError, DeleteRangesRequest, EmployeeRecord, EmployeeRepository, RangePayload,
    SaveRangesRequest, VacationStore,
};
use vacation_domain::{
    AccrualMode, AccrualResult, CommittedRangeSet, DEFAULT_BASE_DAYS_PER_YEAR, Employee,
    EmployeeDraft, EmployeeId, PositionInterval, PositionRateTable, ServerRange,
    calculate_accrual, calculate_vacation_days_simple, parse_iso_date,
    validate_position_history,
};
use vacation_persistence::Persistence;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeResponse, HolidaysResponse,
    ListEmployeesResponse, PositionIntervalInfo, UpdateEmployeeRequest, VacationRangesResponse,
};

/// Lists every employee with simple-mode accrual as of `today`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `rates` - Default additional days per position title
/// * `today` - The accrual reference date
///
/// # Errors
///
/// Returns an error if employees cannot be loaded.
pub fn list_employees(
    persistence: &mut Persistence,
    rates: &PositionRateTable,
    today: Date,
) -> Result<ListEmployeesResponse, ApiError> {
    let records: Vec<EmployeeRecord> = persistence.fetch_employees()?;

    let employees: Vec<EmployeeResponse> = records
        .iter()
        .map(|record| {
            let accrual: AccrualResult =
                calculate_vacation_days_simple(&record.employee, rates, today);
            EmployeeResponse::new(&record.employee, accrual, None, &record.committed)
        })
        .collect();

    Ok(ListEmployeesResponse { employees })
}

/// Loads one employee with exact-mode accrual as of `today`.
///
/// A malformed position history does not fail the request. Accrual is
/// reported as zero and the reason is carried in `calculationError`.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist, or an error
/// if it cannot be loaded.
pub fn get_employee(
    persistence: &mut Persistence,
    rates: &PositionRateTable,
    today: Date,
    employee_id: EmployeeId,
) -> Result<EmployeeResponse, ApiError> {
    let employee: Employee = require_employee(persistence, employee_id)?;
    employee_response(persistence, rates, today, &employee)
}

/// Creates an employee holding one position from the hire date onwards.
///
/// The position gets the default base rate and the title's default
/// additional days.
///
/// # Errors
///
/// Returns `InvalidInput` if the name or title is blank, the hire date is
/// malformed, or used days are negative.
pub fn create_employee(
    persistence: &mut Persistence,
    rates: &PositionRateTable,
    today: Date,
    request: &CreateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    let display_name: String = require_text("displayName", &request.display_name)?;
    let position: String = require_text("position", &request.position)?;
    let hire_date: Date = parse_field("hireDate", &request.hire_date)?;
    require_used_days("usedBaseDays", request.used_base_days)?;
    require_used_days("usedAdditionalDays", request.used_additional_days)?;

    let additional_days: f64 = rates.additional_days_for(&position);
    let draft: EmployeeDraft = EmployeeDraft {
        display_name,
        hire_date,
        used_base_days: request.used_base_days,
        used_additional_days: request.used_additional_days,
        positions: vec![PositionInterval::new(
            hire_date,
            None,
            position,
            DEFAULT_BASE_DAYS_PER_YEAR,
            Some(additional_days),
        )],
    };

    let employee: Employee = persistence.add_employee(draft)?;
    info!(employee_id = %employee.id, "Employee created");
    employee_response(persistence, rates, today, &employee)
}

/// Replaces an employee's fields and position history.
///
/// # Errors
///
/// Returns `InvalidInput` for blank names, malformed dates, negative used
/// days or an invalid position history. Returns `ResourceNotFound` if the
/// employee does not exist.
pub fn update_employee(
    persistence: &mut Persistence,
    rates: &PositionRateTable,
    today: Date,
    employee_id: EmployeeId,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    let display_name: String = require_text("displayName", &request.display_name)?;
    let hire_date: Date = parse_field("hireDate", &request.hire_date)?;
    require_used_days("usedBaseDays", request.used_base_days)?;
    require_used_days("usedAdditionalDays", request.used_additional_days)?;

    let positions: Vec<PositionInterval> = request
        .positions
        .iter()
        .map(parse_interval)
        .collect::<Result<_, _>>()?;
    validate_position_history(&positions).map_err(translate_domain_error)?;

    require_employee(persistence, employee_id)?;
    let employee: Employee = Employee {
        id: employee_id,
        display_name,
        hire_date,
        used_base_days: request.used_base_days,
        used_additional_days: request.used_additional_days,
        positions,
    };
    persistence.update_employee(&employee)?;

    info!(employee_id = %employee_id, "Employee updated");
    employee_response(persistence, rates, today, &employee)
}

/// Deletes an employee and everything committed for them.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist.
pub fn delete_employee(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
) -> Result<DeleteEmployeeResponse, ApiError> {
    require_employee(persistence, employee_id)?;
    persistence.delete_employee(employee_id)?;

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(DeleteEmployeeResponse {
        id: employee_id.value(),
        message: format!("Employee {employee_id} deleted"),
    })
}

/// Commits ranges for one employee and year.
///
/// # Errors
///
/// Returns `InvalidInput` if there is nothing to save or a range is
/// malformed or outside the year, `ResourceNotFound` for an unknown
/// employee, and `Conflict` if a range overlaps a committed range.
pub fn save_vacation_ranges(
    persistence: &mut Persistence,
    request: &SaveRangesRequest,
) -> Result<VacationRangesResponse, ApiError> {
    if request.ranges.is_empty() {
        return Err(translate_core_error(CoreError::NothingToSave));
    }
    persistence.save_ranges(request)?;

    let ranges: Vec<RangePayload> =
        committed_payloads(persistence, request.employee_id, request.year)?;
    Ok(VacationRangesResponse {
        employee_id: request.employee_id.value(),
        year: request.year,
        message: format!("Saved {} range(s) as {}", request.ranges.len(), request.status),
        ranges,
    })
}

/// Removes committed ranges of one employee and year.
///
/// # Errors
///
/// Returns `ResourceNotFound` if any requested range is not committed, in
/// which case nothing is removed.
pub fn delete_vacation_ranges(
    persistence: &mut Persistence,
    request: &DeleteRangesRequest,
) -> Result<VacationRangesResponse, ApiError> {
    persistence.delete_ranges(request)?;

    let ranges: Vec<RangePayload> =
        committed_payloads(persistence, request.employee_id, request.year)?;
    Ok(VacationRangesResponse {
        employee_id: request.employee_id.value(),
        year: request.year,
        message: format!("Deleted {} range(s)", request.ranges.len()),
        ranges,
    })
}

/// Lists the public holidays.
///
/// # Errors
///
/// Returns an error if the holiday table cannot be read.
pub fn list_holidays(persistence: &mut Persistence) -> Result<HolidaysResponse, ApiError> {
    Ok(HolidaysResponse {
        holidays: persistence.fetch_holidays()?.to_iso_strings(),
    })
}

fn employee_response(
    persistence: &mut Persistence,
    rates: &PositionRateTable,
    today: Date,
    employee: &Employee,
) -> Result<EmployeeResponse, ApiError> {
    let committed: Vec<CommittedRangeSet> = persistence.list_committed_sets(Some(employee.id))?;

    let (accrual, calculation_error): (AccrualResult, Option<String>) =
        match calculate_accrual(AccrualMode::Exact, employee, rates, today) {
            Ok(accrual) => (accrual, None),
            Err(err) => {
                warn!(
                    employee_id = %employee.id,
                    error = %err,
                    "Accrual unavailable; reporting zero"
                );
                (AccrualResult::zero(), Some(err.to_string()))
            }
        };

    Ok(EmployeeResponse::new(
        employee,
        accrual,
        calculation_error,
        &committed,
    ))
}

fn require_employee(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
) -> Result<Employee, ApiError> {
    persistence
        .get_employee(employee_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist"),
        })
}

fn committed_payloads(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
    year: i32,
) -> Result<Vec<RangePayload>, ApiError> {
    let ranges: Vec<ServerRange> = persistence.fetch_server_ranges(employee_id, year)?;
    Ok(ranges.iter().map(RangePayload::from).collect())
}

fn require_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from(field),
            message: String::from("must not be empty"),
        });
    }
    Ok(String::from(trimmed))
}

fn require_used_days(field: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::InvalidInput {
            field: String::from(field),
            message: format!("must be a non-negative number, got {value}"),
        })
    }
}

fn parse_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|err| ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    })
}

fn parse_interval(info: &PositionIntervalInfo) -> Result<PositionInterval, ApiError> {
    let from_date: Date = parse_field("positions.fromDate", &info.from_date)?;
    let to_date: Option<Date> = info
        .to_date
        .as_deref()
        .map(|value| parse_field("positions.toDate", value))
        .transpose()?;
    let position: String = require_text("positions.position", &info.position)?;

    Ok(PositionInterval::new(
        from_date,
        to_date,
        position,
        info.base_days_per_year,
        info.additional_days_per_year,
    ))
}
