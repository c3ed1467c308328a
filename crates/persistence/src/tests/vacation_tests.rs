// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{YEAR, add_test_employee, create_test_persistence, delete_request, save_request};
use crate::{Persistence, PersistenceError};
use time::macros::date;
use vacation_booking::{RangePayload, SaveRangesRequest, VacationStore};
use vacation_domain::{CommittedRangeSet, Employee, EmployeeId, RangeStatus, ServerRange};

fn range(start: time::Date, end: time::Date) -> ServerRange {
    ServerRange::new(start, end).unwrap()
}

#[test]
fn test_save_creates_draft_set_with_total() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[
                (date!(2026 - 03 - 02), date!(2026 - 03 - 06)),
                (date!(2026 - 08 - 10), date!(2026 - 08 - 21)),
            ],
        ))
        .unwrap();

    let sets: Vec<CommittedRangeSet> = persistence.list_committed_sets(Some(employee.id)).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].status, RangeStatus::Draft);
    assert_eq!(sets[0].year, YEAR);
    assert_eq!(sets[0].ranges.len(), 2);
    assert_eq!(sets[0].total_duration, 17);
}

#[test]
fn test_second_save_appends_to_existing_set() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 03 - 02), date!(2026 - 03 - 06))],
        ))
        .unwrap();
    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 01 - 05), date!(2026 - 01 - 07))],
        ))
        .unwrap();

    let sets: Vec<CommittedRangeSet> = persistence.list_committed_sets(Some(employee.id)).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].total_duration, 8);
    assert_eq!(
        persistence.fetch_server_ranges(employee.id, YEAR).unwrap(),
        vec![
            range(date!(2026 - 01 - 05), date!(2026 - 01 - 07)),
            range(date!(2026 - 03 - 02), date!(2026 - 03 - 06)),
        ]
    );
}

#[test]
fn test_approved_ranges_live_in_their_own_set() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let mut approved: SaveRangesRequest = save_request(
        employee.id,
        YEAR,
        &[(date!(2026 - 06 - 01), date!(2026 - 06 - 05))],
    );
    approved.status = RangeStatus::Approved;

    persistence.save_ranges(&approved).unwrap();
    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 09 - 01), date!(2026 - 09 - 02))],
        ))
        .unwrap();

    let sets: Vec<CommittedRangeSet> = persistence.list_committed_sets(Some(employee.id)).unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(persistence.fetch_server_ranges(employee.id, YEAR).unwrap().len(), 2);
}

#[test]
fn test_server_ranges_are_scoped_to_year() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    persistence
        .save_ranges(&save_request(
            employee.id,
            2025,
            &[(date!(2025 - 12 - 22), date!(2025 - 12 - 31))],
        ))
        .unwrap();

    assert!(persistence.fetch_server_ranges(employee.id, YEAR).unwrap().is_empty());
    assert_eq!(persistence.fetch_server_ranges(employee.id, 2025).unwrap().len(), 1);
}

#[test]
fn test_save_overlapping_committed_range_is_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 03 - 02), date!(2026 - 03 - 06))],
        ))
        .unwrap();

    let result: Result<(), PersistenceError> = persistence.save_ranges(&save_request(
        employee.id,
        YEAR,
        &[(date!(2026 - 03 - 06), date!(2026 - 03 - 10))],
    ));

    assert!(matches!(result, Err(PersistenceError::Conflict(_))));
    assert_eq!(persistence.fetch_server_ranges(employee.id, YEAR).unwrap().len(), 1);
}

#[test]
fn test_save_overlapping_within_request_stores_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    let result: Result<(), PersistenceError> = persistence.save_ranges(&save_request(
        employee.id,
        YEAR,
        &[
            (date!(2026 - 04 - 01), date!(2026 - 04 - 10)),
            (date!(2026 - 04 - 10), date!(2026 - 04 - 12)),
        ],
    ));

    assert!(matches!(result, Err(PersistenceError::Conflict(_))));
    assert!(persistence.list_committed_sets(None).unwrap().is_empty());
}

#[test]
fn test_other_employees_ranges_do_not_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    let ada: Employee = add_test_employee(&mut persistence, "Ada");
    let grace: Employee = add_test_employee(&mut persistence, "Grace");
    let dates = [(date!(2026 - 05 - 04), date!(2026 - 05 - 08))];

    persistence.save_ranges(&save_request(ada.id, YEAR, &dates)).unwrap();
    persistence.save_ranges(&save_request(grace.id, YEAR, &dates)).unwrap();

    assert_eq!(persistence.list_committed_sets(None).unwrap().len(), 2);
}

#[test]
fn test_save_rejects_empty_request() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    let result: Result<(), PersistenceError> =
        persistence.save_ranges(&save_request(employee.id, YEAR, &[]));

    assert!(matches!(result, Err(PersistenceError::InvalidRequest(_))));
}

#[test]
fn test_save_rejects_range_outside_year() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    let result: Result<(), PersistenceError> = persistence.save_ranges(&save_request(
        employee.id,
        YEAR,
        &[(date!(2026 - 12 - 28), date!(2027 - 01 - 02))],
    ));

    assert!(matches!(result, Err(PersistenceError::InvalidRequest(_))));
}

#[test]
fn test_save_rejects_inverted_and_malformed_ranges() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    let inverted: Result<(), PersistenceError> = persistence.save_ranges(&save_request(
        employee.id,
        YEAR,
        &[(date!(2026 - 03 - 10), date!(2026 - 03 - 02))],
    ));
    let mut malformed: SaveRangesRequest = save_request(employee.id, YEAR, &[]);
    malformed.ranges.push(RangePayload {
        start_date: String::from("2026-02-30"),
        end_date: String::from("2026-03-01"),
    });
    let malformed: Result<(), PersistenceError> = persistence.save_ranges(&malformed);

    assert!(matches!(inverted, Err(PersistenceError::InvalidRequest(_))));
    assert!(matches!(malformed, Err(PersistenceError::InvalidRequest(_))));
}

#[test]
fn test_save_for_unknown_employee_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<(), PersistenceError> = persistence.save_ranges(&save_request(
        EmployeeId::new(99),
        YEAR,
        &[(date!(2026 - 03 - 02), date!(2026 - 03 - 06))],
    ));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_removes_exact_range_and_updates_total() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[
                (date!(2026 - 03 - 02), date!(2026 - 03 - 06)),
                (date!(2026 - 08 - 10), date!(2026 - 08 - 21)),
            ],
        ))
        .unwrap();

    persistence
        .delete_ranges(&delete_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 03 - 02), date!(2026 - 03 - 06))],
        ))
        .unwrap();

    let sets: Vec<CommittedRangeSet> = persistence.list_committed_sets(Some(employee.id)).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].total_duration, 12);
    assert_eq!(
        sets[0].ranges,
        vec![range(date!(2026 - 08 - 10), date!(2026 - 08 - 21))]
    );
}

#[test]
fn test_deleting_last_range_removes_the_set() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    let dates = [(date!(2026 - 03 - 02), date!(2026 - 03 - 06))];
    persistence.save_ranges(&save_request(employee.id, YEAR, &dates)).unwrap();

    persistence.delete_ranges(&delete_request(employee.id, YEAR, &dates)).unwrap();

    assert!(persistence.list_committed_sets(Some(employee.id)).unwrap().is_empty());
}

#[test]
fn test_delete_with_partial_match_removes_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");
    persistence
        .save_ranges(&save_request(
            employee.id,
            YEAR,
            &[(date!(2026 - 03 - 02), date!(2026 - 03 - 06))],
        ))
        .unwrap();

    let result: Result<(), PersistenceError> = persistence.delete_ranges(&delete_request(
        employee.id,
        YEAR,
        &[
            (date!(2026 - 03 - 02), date!(2026 - 03 - 06)),
            (date!(2026 - 03 - 03), date!(2026 - 03 - 04)),
        ],
    ));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert_eq!(persistence.fetch_server_ranges(employee.id, YEAR).unwrap().len(), 1);
}

#[test]
fn test_delete_rejects_empty_request() {
    let mut persistence: Persistence = create_test_persistence();
    let employee: Employee = add_test_employee(&mut persistence, "Ada");

    let result: Result<(), PersistenceError> =
        persistence.delete_ranges(&delete_request(employee.id, YEAR, &[]));

    assert!(matches!(result, Err(PersistenceError::InvalidRequest(_))));
}
