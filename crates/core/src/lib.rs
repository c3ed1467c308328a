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

//! Range selection and booking engine.
//!
//! A board holds, per employee, the committed ranges fetched from storage
//! and the ranges the current user is drafting with a drag gesture. All
//! changes go through the pure [`apply`] reducer. Save and delete produce
//! [`PersistenceRequest`]s that the caller executes and reports back, or
//! that [`dispatch`] drives against a [`VacationStore`].

mod apply;
mod command;
mod driver;
mod error;
mod request;
mod selection;
mod state;
mod store;

#[cfg(test)]
mod tests;

pub use apply::{Transition, apply};
pub use command::BookingCommand;
pub use driver::{DispatchOutcome, dispatch, execute_request, load_board};
pub use error::{CoreError, LockReason};
pub use request::{
    DeleteRangesRequest, PersistenceRequest, RangePayload, RequestId, SaveRangesRequest,
};
pub use selection::{EmployeeSelection, RangeId, VacationRange};
pub use state::{
    ActiveDrag, BookingRules, BookingState, DEFAULT_PROBATION_MONTHS, DragState,
    EmployeeBooking, PendingKind, PendingRequest,
};
pub use store::{EmployeeRecord, EmployeeRepository, VacationStore};
