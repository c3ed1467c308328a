// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{YEAR, committed_july, create_test_board, drag, owner};
use crate::{
    BookingCommand, BookingRules, BookingState, CoreError, DeleteRangesRequest,
    DispatchOutcome, EmployeeRecord, PersistenceRequest, RangePayload, RequestId,
    SaveRangesRequest, VacationStore, dispatch, execute_request, load_board,
};
use time::macros::date;
use vacation_domain::{
    CommittedRangeSet, Employee, EmployeeId, HolidaySet, PositionInterval, PositionRateTable,
    RangeStatus, ServerRange,
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeStoreError(String);

/// Keeps committed ranges in memory and can be told to reject writes.
#[derive(Default)]
struct FakeStore {
    ranges: Vec<(EmployeeId, i32, ServerRange)>,
    reject_writes: bool,
    save_calls: usize,
}

impl VacationStore for FakeStore {
    type Error = FakeStoreError;

    fn fetch_employees(&mut self) -> Result<Vec<EmployeeRecord>, Self::Error> {
        Ok(Vec::new())
    }

    fn fetch_holidays(&mut self) -> Result<HolidaySet, Self::Error> {
        Ok(HolidaySet::new())
    }

    fn fetch_server_ranges(
        &mut self,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<Vec<ServerRange>, Self::Error> {
        Ok(self
            .ranges
            .iter()
            .filter(|(id, y, _)| *id == employee_id && *y == year)
            .map(|(_, _, range)| *range)
            .collect())
    }

    fn save_ranges(&mut self, request: &SaveRangesRequest) -> Result<(), Self::Error> {
        self.save_calls += 1;
        if self.reject_writes {
            return Err(FakeStoreError(String::from("database is locked")));
        }
        for payload in &request.ranges {
            let range: ServerRange = payload
                .to_server_range()
                .map_err(|e| FakeStoreError(e.to_string()))?;
            self.ranges.push((request.employee_id, request.year, range));
        }
        Ok(())
    }

    fn delete_ranges(&mut self, request: &DeleteRangesRequest) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(FakeStoreError(String::from("database is locked")));
        }
        for payload in &request.ranges {
            let range: ServerRange = payload
                .to_server_range()
                .map_err(|e| FakeStoreError(e.to_string()))?;
            self.ranges
                .retain(|(id, y, r)| !(*id == request.employee_id && *y == request.year && *r == range));
        }
        Ok(())
    }
}

fn store_with_july() -> FakeStore {
    FakeStore {
        ranges: vec![(owner(), YEAR, committed_july())],
        ..FakeStore::default()
    }
}

#[test]
fn test_dispatch_save_refreshes_committed_ranges() {
    let mut store: FakeStore = store_with_july();
    let state: BookingState = drag(
        &create_test_board(),
        owner(),
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 04),
    );

    let outcome: DispatchOutcome = dispatch(
        &mut store,
        &state,
        BookingCommand::Save {
            employee_id: owner(),
            year: YEAR,
        },
    )
    .unwrap();

    assert!(outcome.surfaced.is_none());
    let booking = outcome.state.employee(owner()).unwrap();
    assert!(booking.selection.is_empty());
    assert!(booking.pending.is_none());
    assert_eq!(
        booking.server_ranges,
        vec![
            ServerRange::new(date!(2026 - 03 - 02), date!(2026 - 03 - 04)).unwrap(),
            committed_july(),
        ]
    );
    assert!(outcome.state.is_in_server_range(owner(), date!(2026 - 03 - 03)));
}

#[test]
fn test_dispatch_save_failure_is_surfaced() {
    let mut store: FakeStore = FakeStore {
        reject_writes: true,
        ..store_with_july()
    };
    let state: BookingState = drag(
        &create_test_board(),
        owner(),
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 04),
    );

    let outcome: DispatchOutcome = dispatch(
        &mut store,
        &state,
        BookingCommand::Save {
            employee_id: owner(),
            year: YEAR,
        },
    )
    .unwrap();

    assert_eq!(
        outcome.surfaced,
        Some(CoreError::PersistenceFailure(String::from(
            "database is locked"
        )))
    );
    assert_eq!(outcome.state.employee(owner()), state.employee(owner()));
}

#[test]
fn test_dispatch_empty_save_never_reaches_store() {
    let mut store: FakeStore = store_with_july();

    let result: Result<DispatchOutcome, CoreError> = dispatch(
        &mut store,
        &create_test_board(),
        BookingCommand::Save {
            employee_id: owner(),
            year: YEAR,
        },
    );

    assert_eq!(result.unwrap_err(), CoreError::NothingToSave);
    assert_eq!(store.save_calls, 0);
}

#[test]
fn test_dispatch_delete_of_committed_range() {
    let mut store: FakeStore = store_with_july();

    let outcome: DispatchOutcome = dispatch(
        &mut store,
        &create_test_board(),
        BookingCommand::DeleteRanges {
            employee_id: owner(),
            range_ids: std::collections::BTreeSet::new(),
            server_ranges: vec![committed_july()],
        },
    )
    .unwrap();

    assert!(outcome.state.employee(owner()).unwrap().server_ranges.is_empty());
    assert!(store.ranges.is_empty());
}

#[test]
fn test_execute_request_reports_failure_reason() {
    let mut store: FakeStore = FakeStore {
        reject_writes: true,
        ..FakeStore::default()
    };
    let request: PersistenceRequest = PersistenceRequest::Delete {
        request_id: RequestId::new(7),
        payload: DeleteRangesRequest {
            employee_id: owner(),
            year: YEAR,
            ranges: vec![RangePayload::from(&committed_july())],
        },
    };

    assert_eq!(
        execute_request(&mut store, &request),
        BookingCommand::RequestFailed {
            request_id: RequestId::new(7),
            employee_id: owner(),
            year: YEAR,
            reason: String::from("database is locked"),
        }
    );
}

fn record(id: i64, positions: Vec<PositionInterval>, committed: Vec<CommittedRangeSet>) -> EmployeeRecord {
    EmployeeRecord {
        employee: Employee {
            id: EmployeeId::new(id),
            display_name: format!("Employee {id}"),
            hire_date: date!(2020 - 01 - 01),
            used_base_days: 0.0,
            used_additional_days: 0.0,
            positions,
        },
        committed,
    }
}

#[test]
fn test_load_board_projects_entitlement_and_filters_year() {
    let steady: EmployeeRecord = record(
        1,
        vec![PositionInterval::new(
            date!(2020 - 01 - 01),
            None,
            "Специалист",
            28.0,
            None,
        )],
        vec![
            CommittedRangeSet::new(
                EmployeeId::new(1),
                2027,
                RangeStatus::Approved,
                vec![ServerRange::new(date!(2027 - 02 - 01), date!(2027 - 02 - 05)).unwrap()],
            ),
            CommittedRangeSet::new(
                EmployeeId::new(1),
                2026,
                RangeStatus::Draft,
                vec![committed_july()],
            ),
        ],
    );
    let broken: EmployeeRecord = record(
        2,
        vec![PositionInterval::new(
            date!(2024 - 01 - 01),
            Some(date!(2020 - 01 - 01)),
            "Специалист",
            28.0,
            None,
        )],
        Vec::new(),
    );

    let state: BookingState = load_board(
        &[steady, broken],
        &PositionRateTable::standard(),
        2027,
        Some(EmployeeId::new(1)),
        date!(2026 - 10 - 18),
        BookingRules::default(),
    )
    .unwrap();

    let steady_booking = state.employee(EmployeeId::new(1)).unwrap();
    assert!((steady_booking.entitlement_days - 8.0 * 28.0).abs() < 0.001);
    assert_eq!(
        steady_booking.server_ranges,
        vec![ServerRange::new(date!(2027 - 02 - 01), date!(2027 - 02 - 05)).unwrap()]
    );
    assert_eq!(steady_booking.probation_end, date!(2020 - 07 - 01));

    let broken_booking = state.employee(EmployeeId::new(2)).unwrap();
    assert!(broken_booking.entitlement_days.abs() < f64::EPSILON);
}
