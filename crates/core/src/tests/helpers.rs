// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingCommand, BookingRules, BookingState, EmployeeBooking, apply};
use time::Date;
use time::macros::date;
use vacation_domain::{EmployeeId, ServerRange};

pub const YEAR: i32 = 2026;

/// Hired 2020-01-01, ten days available, 2026-07-01..=2026-07-14 committed.
pub const fn owner() -> EmployeeId {
    EmployeeId::new(1)
}

/// Hired 2026-01-15, so on probation until 2026-07-15.
pub const fn newcomer() -> EmployeeId {
    EmployeeId::new(2)
}

/// Another employee's row, never editable by the current user.
pub const fn colleague() -> EmployeeId {
    EmployeeId::new(3)
}

pub fn committed_july() -> ServerRange {
    ServerRange::new(date!(2026 - 07 - 01), date!(2026 - 07 - 14)).unwrap()
}

pub fn create_test_board_for(current_user: EmployeeId) -> BookingState {
    let rules: BookingRules = BookingRules::default();
    let mut state: BookingState = BookingState::new(YEAR, Some(current_user), rules);

    state.insert_employee(
        EmployeeBooking::new(
            owner(),
            date!(2020 - 01 - 01),
            rules.probation_months,
            10.0,
            vec![committed_july()],
        )
        .unwrap(),
    );
    state.insert_employee(
        EmployeeBooking::new(
            newcomer(),
            date!(2026 - 01 - 15),
            rules.probation_months,
            28.0,
            Vec::new(),
        )
        .unwrap(),
    );
    state.insert_employee(
        EmployeeBooking::new(
            colleague(),
            date!(2018 - 03 - 01),
            rules.probation_months,
            28.0,
            Vec::new(),
        )
        .unwrap(),
    );
    state
}

pub fn create_test_board() -> BookingState {
    create_test_board_for(owner())
}

/// Applies a command that must be accepted.
pub fn run(state: &BookingState, command: BookingCommand) -> BookingState {
    apply(state, command).unwrap().new_state
}

/// Presses on `from`, moves to `to` and releases.
pub fn drag(state: &BookingState, employee_id: EmployeeId, from: Date, to: Date) -> BookingState {
    let state: BookingState = run(state, BookingCommand::StartDrag { employee_id, date: from });
    let state: BookingState = run(&state, BookingCommand::ExtendDrag { employee_id, date: to });
    run(&state, BookingCommand::CommitDrag)
}
