// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::Date;
use time::macros::date;
use vacation_domain::{EmployeeId, PositionRateTable, RangeStatus};
use vacation_persistence::Persistence;

use crate::{
    CreateEmployeeRequest, DeleteRangesRequest, EmployeeResponse, RangePayload,
    SaveRangesRequest, create_employee,
};

pub const TODAY: Date = date!(2026 - 01 - 01);
pub const YEAR: i32 = 2026;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_rates() -> PositionRateTable {
    PositionRateTable::standard()
}

/// Hired 2016-01-01 as a consultant, eight additional days per year.
pub fn create_test_employee_request() -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        display_name: String::from("Ada Lovelace"),
        hire_date: String::from("2016-01-01"),
        position: String::from("Консультант"),
        used_base_days: 0.0,
        used_additional_days: 0.0,
    }
}

pub fn create_test_employee(persistence: &mut Persistence) -> EmployeeResponse {
    create_employee(
        persistence,
        &create_test_rates(),
        TODAY,
        &create_test_employee_request(),
    )
    .unwrap()
}

pub fn create_save_request(employee_id: i64, ranges: &[(&str, &str)]) -> SaveRangesRequest {
    SaveRangesRequest {
        employee_id: EmployeeId::new(employee_id),
        year: YEAR,
        ranges: payloads(ranges),
        status: RangeStatus::Draft,
    }
}

pub fn create_delete_request(employee_id: i64, ranges: &[(&str, &str)]) -> DeleteRangesRequest {
    DeleteRangesRequest {
        employee_id: EmployeeId::new(employee_id),
        year: YEAR,
        ranges: payloads(ranges),
    }
}

fn payloads(ranges: &[(&str, &str)]) -> Vec<RangePayload> {
    ranges
        .iter()
        .map(|(start, end)| RangePayload {
            start_date: String::from(*start),
            end_date: String::from(*end),
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.05,
        "expected {expected}, got {actual}"
    );
}
