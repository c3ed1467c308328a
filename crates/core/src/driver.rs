// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Glue between the pure reducer and a [`VacationStore`].

use crate::apply::{Transition, apply};
use crate::command::BookingCommand;
use crate::error::CoreError;
use crate::request::PersistenceRequest;
use crate::state::{BookingRules, BookingState, EmployeeBooking};
use crate::store::{EmployeeRecord, VacationStore};
use time::Date;
use tracing::{info, warn};
use vacation_domain::{AccrualResult, EmployeeId, PositionRateTable, project_entitlement};

/// The state reached after a command and any request it issued settled.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub state: BookingState,
    /// A failure the user should see, such as a rejected save.
    pub surfaced: Option<CoreError>,
}

/// Builds a booking board for `year` from fetched employee records.
///
/// Each employee's selection cap is the entitlement projected for `year`
/// under `rules.accrual_mode`. An employee whose accrual cannot be computed
/// gets a cap of zero and a warning instead of failing the whole board.
///
/// # Arguments
///
/// * `records` - Employee snapshots with their committed ranges
/// * `rates` - Additional-days table used for intervals without a rate
/// * `year` - The year to book
/// * `current_user` - The authenticated employee, if any
/// * `today` - The current date
/// * `rules` - Probation and accrual rules
///
/// # Errors
///
/// Returns an error if an employee's probation end cannot be represented.
pub fn load_board(
    records: &[EmployeeRecord],
    rates: &PositionRateTable,
    year: i32,
    current_user: Option<EmployeeId>,
    today: Date,
    rules: BookingRules,
) -> Result<BookingState, CoreError> {
    let mut state: BookingState = BookingState::new(year, current_user, rules);

    for record in records {
        let employee_id: EmployeeId = record.employee.id;
        let entitlement_days: f64 =
            project_entitlement(rules.accrual_mode, &record.employee, rates, today, year)
                .map_or_else(
                    |err| {
                        warn!(
                            employee_id = %employee_id,
                            year,
                            error = %err,
                            "Entitlement unavailable; booking capped at zero"
                        );
                        0.0
                    },
                    |result: AccrualResult| result.total_available_days,
                );

        state.insert_employee(EmployeeBooking::new(
            employee_id,
            record.employee.hire_date,
            rules.probation_months,
            entitlement_days,
            record.server_ranges_for(year),
        )?);
    }

    info!(
        year,
        employees = records.len(),
        "Loaded booking board"
    );
    Ok(state)
}

/// Executes a request and returns the completion command to apply.
pub fn execute_request<S: VacationStore>(
    store: &mut S,
    request: &PersistenceRequest,
) -> BookingCommand {
    let outcome: Result<(), S::Error> = match request {
        PersistenceRequest::Save { payload, .. } => store.save_ranges(payload),
        PersistenceRequest::Delete { payload, .. } => store.delete_ranges(payload),
    };

    match outcome {
        Ok(()) => BookingCommand::RequestSucceeded {
            request_id: request.request_id(),
            employee_id: request.employee_id(),
            year: request.year(),
        },
        Err(err) => {
            warn!(
                employee_id = %request.employee_id(),
                year = request.year(),
                request_id = %request.request_id(),
                error = %err,
                "Persistence request failed"
            );
            BookingCommand::RequestFailed {
                request_id: request.request_id(),
                employee_id: request.employee_id(),
                year: request.year(),
                reason: err.to_string(),
            }
        }
    }
}

/// Applies a command and drives any resulting request to completion.
///
/// After a successful save or delete, the employee's committed ranges are
/// refetched so saved drafts reappear as committed ranges. A failed refetch
/// is logged and leaves the previous committed ranges in place.
///
/// # Errors
///
/// Returns an error if the command itself is rejected. Persistence failures
/// are not errors here; they are reported through
/// [`DispatchOutcome::surfaced`].
pub fn dispatch<S: VacationStore>(
    store: &mut S,
    state: &BookingState,
    command: BookingCommand,
) -> Result<DispatchOutcome, CoreError> {
    let transition: Transition = apply(state, command)?;
    let Some(request) = transition.request else {
        return Ok(DispatchOutcome {
            state: transition.new_state,
            surfaced: transition.surfaced,
        });
    };

    let completion: BookingCommand = execute_request(store, &request);
    let succeeded: bool = matches!(completion, BookingCommand::RequestSucceeded { .. });
    let settled: Transition = apply(&transition.new_state, completion)?;

    if !succeeded {
        return Ok(DispatchOutcome {
            state: settled.new_state,
            surfaced: settled.surfaced,
        });
    }

    let employee_id: EmployeeId = request.employee_id();
    let state: BookingState = match store.fetch_server_ranges(employee_id, request.year()) {
        Ok(server_ranges) => {
            apply(
                &settled.new_state,
                BookingCommand::RefreshServerRanges {
                    employee_id,
                    server_ranges,
                },
            )?
            .new_state
        }
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                year = request.year(),
                error = %err,
                "Failed to refresh committed ranges"
            );
            settled.new_state
        }
    };

    Ok(DispatchOutcome {
        state,
        surfaced: None,
    })
}
