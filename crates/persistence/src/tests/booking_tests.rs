// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking engine driven against a real database.

use super::{add_test_employee, create_test_persistence, save_request};
use crate::Persistence;
use time::Date;
use time::macros::date;
use vacation_booking::{
    BookingCommand, BookingRules, BookingState, CoreError, DispatchOutcome, EmployeeBooking,
    EmployeeRecord, VacationStore, dispatch, load_board,
};
use vacation_domain::{Employee, PositionRateTable, ServerRange};

const BOOKING_YEAR: i32 = 2027;
const TODAY: Date = date!(2026 - 10 - 01);

fn load(persistence: &mut Persistence, employee: &Employee) -> BookingState {
    let records: Vec<EmployeeRecord> = persistence.fetch_employees().unwrap();
    load_board(
        &records,
        &PositionRateTable::standard(),
        BOOKING_YEAR,
        Some(employee.id),
        TODAY,
        BookingRules::default(),
    )
    .unwrap()
}

fn step(persistence: &mut Persistence, state: &BookingState, command: BookingCommand) -> DispatchOutcome {
    dispatch(persistence, state, command).unwrap()
}

fn drag(
    persistence: &mut Persistence,
    state: &BookingState,
    employee: &Employee,
    from: Date,
    to: Date,
) -> BookingState {
    let outcome: DispatchOutcome = step(
        persistence,
        state,
        BookingCommand::StartDrag {
            employee_id: employee.id,
            date: from,
        },
    );
    let outcome: DispatchOutcome = step(
        persistence,
        &outcome.state,
        BookingCommand::ExtendDrag {
            employee_id: employee.id,
            date: to,
        },
    );
    step(persistence, &outcome.state, BookingCommand::CommitDrag).state
}

#[test]
fn test_board_carries_committed_ranges_from_database() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    persistence
        .save_ranges(&save_request(
            employee.id,
            BOOKING_YEAR,
            &[(date!(2027 - 02 - 01), date!(2027 - 02 - 05))],
        ))
        .unwrap();

    let state: BookingState = load(&mut persistence, &employee);

    let booking: &EmployeeBooking = state.employee(employee.id).unwrap();
    assert_eq!(booking.server_ranges.len(), 1);
    assert!(state.is_in_server_range(employee.id, date!(2027 - 02 - 03)));
    assert!(booking.entitlement_days > 0.0);
}

#[test]
fn test_saved_selection_becomes_committed() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let state: BookingState = load(&mut persistence, &employee);

    let state: BookingState = drag(
        &mut persistence,
        &state,
        &employee,
        date!(2027 - 03 - 01),
        date!(2027 - 03 - 05),
    );
    let outcome: DispatchOutcome = step(
        &mut persistence,
        &state,
        BookingCommand::Save {
            employee_id: employee.id,
            year: BOOKING_YEAR,
        },
    );

    assert!(outcome.surfaced.is_none());
    let booking: &EmployeeBooking = outcome.state.employee(employee.id).unwrap();
    assert!(booking.selection.is_empty());
    assert!(booking.pending.is_none());
    let committed: ServerRange =
        ServerRange::new(date!(2027 - 03 - 01), date!(2027 - 03 - 05)).unwrap();
    assert_eq!(booking.server_ranges, vec![committed]);
    assert_eq!(
        persistence.fetch_server_ranges(employee.id, BOOKING_YEAR).unwrap(),
        vec![committed]
    );
}

#[test]
fn test_rejected_save_keeps_selection_for_retry() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let state: BookingState = load(&mut persistence, &employee);
    let state: BookingState = drag(
        &mut persistence,
        &state,
        &employee,
        date!(2027 - 03 - 01),
        date!(2027 - 03 - 05),
    );

    // Another session commits an overlapping range after the board loaded.
    persistence
        .save_ranges(&save_request(
            employee.id,
            BOOKING_YEAR,
            &[(date!(2027 - 03 - 04), date!(2027 - 03 - 04))],
        ))
        .unwrap();

    let outcome: DispatchOutcome = step(
        &mut persistence,
        &state,
        BookingCommand::Save {
            employee_id: employee.id,
            year: BOOKING_YEAR,
        },
    );

    assert!(matches!(outcome.surfaced, Some(CoreError::PersistenceFailure(_))));
    let booking: &EmployeeBooking = outcome.state.employee(employee.id).unwrap();
    assert_eq!(booking.selection.total_selected_days(), 5);
    assert!(booking.pending.is_none());
    assert_eq!(
        persistence.fetch_server_ranges(employee.id, BOOKING_YEAR).unwrap().len(),
        1
    );
}

#[test]
fn test_overlapping_drag_is_refused_so_selection_stays_saveable() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let state: BookingState = load(&mut persistence, &employee);
    let state: BookingState = drag(
        &mut persistence,
        &state,
        &employee,
        date!(2027 - 03 - 02),
        date!(2027 - 03 - 04),
    );
    let outcome: DispatchOutcome = step(
        &mut persistence,
        &state,
        BookingCommand::StartDrag {
            employee_id: employee.id,
            date: date!(2027 - 03 - 06),
        },
    );

    let refused: Result<DispatchOutcome, CoreError> = dispatch(
        &mut persistence,
        &outcome.state,
        BookingCommand::ExtendDrag {
            employee_id: employee.id,
            date: date!(2027 - 03 - 03),
        },
    );
    assert!(matches!(refused, Err(CoreError::NotEditable { .. })));

    let outcome: DispatchOutcome = step(&mut persistence, &outcome.state, BookingCommand::CommitDrag);
    let outcome: DispatchOutcome = step(
        &mut persistence,
        &outcome.state,
        BookingCommand::Save {
            employee_id: employee.id,
            year: BOOKING_YEAR,
        },
    );

    assert!(outcome.surfaced.is_none());
    assert!(outcome.state.employee(employee.id).unwrap().selection.is_empty());
    assert_eq!(
        persistence.fetch_server_ranges(employee.id, BOOKING_YEAR).unwrap(),
        vec![
            ServerRange::new(date!(2027 - 03 - 02), date!(2027 - 03 - 04)).unwrap(),
            ServerRange::new(date!(2027 - 03 - 06), date!(2027 - 03 - 06)).unwrap(),
        ]
    );
}

#[test]
fn test_deleting_committed_range_removes_it_from_board_and_database() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let committed: ServerRange =
        ServerRange::new(date!(2027 - 02 - 01), date!(2027 - 02 - 05)).unwrap();
    persistence
        .save_ranges(&save_request(
            employee.id,
            BOOKING_YEAR,
            &[(committed.start_date(), committed.end_date())],
        ))
        .unwrap();
    let state: BookingState = load(&mut persistence, &employee);

    let outcome: DispatchOutcome = step(
        &mut persistence,
        &state,
        BookingCommand::DeleteRanges {
            employee_id: employee.id,
            range_ids: std::collections::BTreeSet::new(),
            server_ranges: vec![committed],
        },
    );

    assert!(outcome.surfaced.is_none());
    assert!(outcome.state.employee(employee.id).unwrap().server_ranges.is_empty());
    assert!(
        persistence
            .fetch_server_ranges(employee.id, BOOKING_YEAR)
            .unwrap()
            .is_empty()
    );
}
