// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the vacation planner.
//!
//! Operations take request DTOs, validate them, and run against the
//! persistence layer. Errors from every lower layer are translated into
//! [`ApiError`] before they reach a transport.

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_employee, delete_employee, delete_vacation_ranges, get_employee, list_employees,
    list_holidays, save_vacation_ranges, update_employee,
};
pub use request_response::{
    AccrualInfo, CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeResponse,
    HolidaysResponse, ListEmployeesResponse, PositionIntervalInfo, RangeSetInfo,
    UpdateEmployeeRequest, VacationRangesResponse,
};
pub use vacation_booking::{DeleteRangesRequest, RangePayload, SaveRangesRequest};
