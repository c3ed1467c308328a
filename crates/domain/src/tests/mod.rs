// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod calendar;

use crate::{Employee, EmployeeId, PositionInterval};
use time::Date;

pub fn create_test_employee(hire_date: Date, positions: Vec<PositionInterval>) -> Employee {
    Employee {
        id: EmployeeId::new(1),
        display_name: String::from("Test Employee"),
        hire_date,
        used_base_days: 0.0,
        used_additional_days: 0.0,
        positions,
    }
}

/// Single open-ended position held since `hire_date`.
pub fn create_single_position_employee(
    hire_date: Date,
    base_days_per_year: f64,
    additional_days_per_year: f64,
) -> Employee {
    create_test_employee(
        hire_date,
        vec![PositionInterval::new(
            hire_date,
            None,
            "Ведущий специалист",
            base_days_per_year,
            Some(additional_days_per_year),
        )],
    )
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
