// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection set-up tests.
//!
//! Every other test module opens an in-memory database, so migrations and
//! foreign key enforcement are exercised throughout. The tests here cover
//! isolation between instances and the file-backed path.

use super::{add_test_employee, create_test_persistence};
use crate::{Persistence, PersistenceError, backend};
use std::path::PathBuf;
use vacation_booking::{EmployeeRepository, VacationStore};
use vacation_domain::Employee;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<(), PersistenceError> =
        backend::sqlite::verify_foreign_key_enforcement(&mut persistence.conn);
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    add_test_employee(&mut db1, "Ada");

    assert_eq!(db1.list_employees().unwrap().len(), 1);
    assert!(db2.list_employees().unwrap().is_empty());
}

#[test]
fn test_empty_database_reads_cleanly() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(persistence.fetch_employees().unwrap().is_empty());
    assert!(persistence.fetch_holidays().unwrap().is_empty());
    assert!(persistence.list_committed_sets(None).unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "vacation-planner-test-{}.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let created: Employee = {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        add_test_employee(&mut persistence, "Grace")
    };

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let loaded: Option<Employee> = reopened.get_employee(created.id).unwrap();
    assert_eq!(loaded, Some(created));

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let mut file: std::ffi::OsString = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
