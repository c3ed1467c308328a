// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod booking_tests;
mod initialization_tests;
mod vacation_tests;

use crate::Persistence;
use time::Date;
use time::macros::date;
use vacation_booking::{DeleteRangesRequest, EmployeeRepository, RangePayload, SaveRangesRequest};
use vacation_domain::{Employee, EmployeeDraft, EmployeeId, PositionInterval, RangeStatus};

pub const YEAR: i32 = 2026;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// A controller hired 2020-01-01 who became a supervisor on 2024-01-01.
pub fn create_test_draft(display_name: &str) -> EmployeeDraft {
    EmployeeDraft {
        display_name: String::from(display_name),
        hire_date: date!(2020 - 01 - 01),
        used_base_days: 12.0,
        used_additional_days: 1.5,
        positions: vec![
            PositionInterval::new(
                date!(2020 - 01 - 01),
                Some(date!(2023 - 12 - 31)),
                "Controller",
                28.0,
                None,
            ),
            PositionInterval::new(date!(2024 - 01 - 01), None, "Supervisor", 28.0, Some(5.0)),
        ],
    }
}

pub fn add_test_employee(persistence: &mut Persistence, display_name: &str) -> Employee {
    persistence
        .add_employee(create_test_draft(display_name))
        .unwrap()
}

pub fn save_request(
    employee_id: EmployeeId,
    year: i32,
    ranges: &[(Date, Date)],
) -> SaveRangesRequest {
    SaveRangesRequest {
        employee_id,
        year,
        ranges: ranges
            .iter()
            .map(|(start, end)| RangePayload::from_dates(*start, *end))
            .collect(),
        status: RangeStatus::Draft,
    }
}

pub fn delete_request(
    employee_id: EmployeeId,
    year: i32,
    ranges: &[(Date, Date)],
) -> DeleteRangesRequest {
    DeleteRangesRequest {
        employee_id,
        year,
        ranges: ranges
            .iter()
            .map(|(start, end)| RangePayload::from_dates(*start, *end))
            .collect(),
    }
}
