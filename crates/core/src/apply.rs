// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::BookingCommand;
use crate::error::{CoreError, LockReason};
use crate::request::{
    DeleteRangesRequest, PersistenceRequest, RangePayload, RequestId, SaveRangesRequest,
};
use crate::selection::{RangeId, VacationRange};
use crate::state::{
    ActiveDrag, BookingState, DragState, EmployeeBooking, PendingKind, PendingRequest,
};
use std::collections::BTreeSet;
use time::Date;
use tracing::{debug, info, warn};
use vacation_domain::{EmployeeId, RangeStatus, ServerRange};

/// The result of a successful booking transition.
///
/// Transitions are atomic: a rejected command returns `Err` and the caller
/// keeps the previous state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The state after the transition.
    pub new_state: BookingState,
    /// A request the caller must execute against persistence.
    pub request: Option<PersistenceRequest>,
    /// An error to show the user even though the transition was applied.
    pub surfaced: Option<CoreError>,
}

impl Transition {
    const fn settled(new_state: BookingState) -> Self {
        Self {
            new_state,
            request: None,
            surfaced: None,
        }
    }
}

/// Applies a command to the booking state, producing a new state.
///
/// This function is pure: it never performs I/O. Save and delete commands
/// return a [`PersistenceRequest`] for the caller to execute, and the
/// outcome comes back as `RequestSucceeded` or `RequestFailed`.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Transition)` containing the new state and any request to execute
/// * `Err(CoreError)` if the command is rejected
///
/// # Errors
///
/// Returns an error if:
/// - The targeted cell is locked (`NotEditable`)
/// - The selection would exceed the entitlement (`EntitlementExceeded`)
/// - A save is requested with no local ranges (`NothingToSave`)
/// - A request is already pending for the employee (`RequestInFlight`)
/// - The employee, range or committed range is unknown
pub fn apply(state: &BookingState, command: BookingCommand) -> Result<Transition, CoreError> {
    match command {
        BookingCommand::StartDrag { employee_id, date } => start_drag(state, employee_id, date),
        BookingCommand::ExtendDrag { employee_id, date } => {
            extend_drag(state, employee_id, date)
        }
        BookingCommand::CommitDrag => Ok(commit_drag(state)),
        BookingCommand::CancelDrag => {
            let mut new_state: BookingState = state.clone();
            new_state.drag = DragState::Idle;
            Ok(Transition::settled(new_state))
        }
        BookingCommand::DeleteRanges {
            employee_id,
            range_ids,
            server_ranges,
        } => delete_ranges(state, employee_id, range_ids, server_ranges),
        BookingCommand::Save { employee_id, year } => save(state, employee_id, year),
        BookingCommand::RequestSucceeded {
            request_id,
            employee_id,
            year,
        } => Ok(request_succeeded(state, request_id, employee_id, year)),
        BookingCommand::RequestFailed {
            request_id,
            employee_id,
            year,
            reason,
        } => Ok(request_failed(state, request_id, employee_id, year, reason)),
        BookingCommand::RefreshServerRanges {
            employee_id,
            server_ranges,
        } => {
            let mut new_state: BookingState = state.clone();
            let booking: &mut EmployeeBooking = new_state
                .employee_mut(employee_id)
                .ok_or(CoreError::UnknownEmployee(employee_id))?;
            let mut server_ranges: Vec<ServerRange> = server_ranges;
            server_ranges.sort();
            booking.server_ranges = server_ranges;
            Ok(Transition::settled(new_state))
        }
    }
}

fn booking_for(
    state: &BookingState,
    employee_id: EmployeeId,
) -> Result<&EmployeeBooking, CoreError> {
    state
        .employee(employee_id)
        .ok_or(CoreError::UnknownEmployee(employee_id))
}

fn ensure_idle(state: &BookingState, booking: &EmployeeBooking) -> Result<(), CoreError> {
    if booking.pending.is_some() {
        return Err(CoreError::RequestInFlight(booking.employee_id));
    }
    if state.drag.is_dragging() {
        return Err(CoreError::DragInProgress);
    }
    Ok(())
}

fn ensure_owner(state: &BookingState, employee_id: EmployeeId) -> Result<(), CoreError> {
    if state.current_user == Some(employee_id) {
        Ok(())
    } else {
        Err(CoreError::locked(LockReason::NotOwner))
    }
}

fn start_drag(
    state: &BookingState,
    employee_id: EmployeeId,
    date: Date,
) -> Result<Transition, CoreError> {
    let booking: &EmployeeBooking = booking_for(state, employee_id)?;
    ensure_idle(state, booking)?;

    if let Some(reason) = state.lock_reason(employee_id, date) {
        debug!(employee_id = %employee_id, %date, %reason, "Rejected drag start");
        return Err(CoreError::locked(reason));
    }

    let drag: ActiveDrag = if let Some(range) = booking.selection.find_containing(date) {
        // Pressing inside a range reshapes it from the edge nearest the press
        let to_start: i64 = (date - range.start_date).whole_days();
        let to_end: i64 = (range.end_date - date).whole_days();
        let anchor: Date = if to_start <= to_end {
            range.end_date
        } else {
            range.start_date
        };
        ActiveDrag {
            employee_id,
            anchor,
            span_start: range.start_date,
            span_end: range.end_date,
            editing: Some(range.id),
        }
    } else {
        let requested: u32 = booking.selection.total_selected_days() + 1;
        if f64::from(requested) > booking.entitlement_days {
            debug!(
                employee_id = %employee_id,
                requested,
                available = booking.entitlement_days,
                "Rejected drag start over entitlement"
            );
            return Err(CoreError::EntitlementExceeded {
                requested,
                available: booking.entitlement_days,
            });
        }
        ActiveDrag {
            employee_id,
            anchor: date,
            span_start: date,
            span_end: date,
            editing: None,
        }
    };

    let mut new_state: BookingState = state.clone();
    new_state.drag = DragState::Dragging(drag);
    Ok(Transition::settled(new_state))
}

fn extend_drag(
    state: &BookingState,
    employee_id: EmployeeId,
    date: Date,
) -> Result<Transition, CoreError> {
    let Some(drag) = state.drag.active() else {
        return Ok(Transition::settled(state.clone()));
    };
    if drag.employee_id != employee_id {
        return Ok(Transition::settled(state.clone()));
    }

    let booking: &EmployeeBooking = booking_for(state, employee_id)?;
    let stretched: ActiveDrag = drag.stretched_to(date);

    if stretched.span_start.year() != state.year || stretched.span_end.year() != state.year {
        return Err(CoreError::locked(LockReason::OutsideYear));
    }
    // The anchor is always editable, so a lock anywhere in the span shows at its start
    if let Some(reason) = booking.tenure_lock(stretched.span_start) {
        return Err(CoreError::locked(reason));
    }
    if booking.overlaps_server_range(stretched.span_start, stretched.span_end) {
        return Err(CoreError::locked(LockReason::ServerConfirmed));
    }
    if booking
        .selection
        .overlaps_other(stretched.span_start, stretched.span_end, stretched.editing)
    {
        debug!(
            employee_id = %employee_id,
            start = %stretched.span_start,
            end = %stretched.span_end,
            "Rejected drag extension across another range"
        );
        return Err(CoreError::locked(LockReason::LocallySelected));
    }

    let requested: u32 =
        booking.selection.days_excluding(stretched.editing) + stretched.span_length();
    if f64::from(requested) > booking.entitlement_days {
        debug!(
            employee_id = %employee_id,
            requested,
            available = booking.entitlement_days,
            "Rejected drag extension over entitlement"
        );
        return Err(CoreError::EntitlementExceeded {
            requested,
            available: booking.entitlement_days,
        });
    }

    let mut new_state: BookingState = state.clone();
    new_state.drag = DragState::Dragging(stretched);
    Ok(Transition::settled(new_state))
}

fn commit_drag(state: &BookingState) -> Transition {
    let mut new_state: BookingState = state.clone();
    let DragState::Dragging(drag) = new_state.drag else {
        return Transition::settled(new_state);
    };
    new_state.drag = DragState::Idle;

    let id: RangeId = match drag.editing {
        Some(id) => id,
        None => new_state.allocate_range_id(),
    };
    let range: VacationRange = VacationRange::new(id, drag.span_start, drag.span_end);

    if let Some(booking) = new_state.employee_mut(drag.employee_id) {
        booking.selection.upsert(range);
        info!(
            employee_id = %drag.employee_id,
            range_id = %id,
            start = %range.start_date,
            end = %range.end_date,
            days = range.day_count,
            "Committed vacation range"
        );
    }

    Transition::settled(new_state)
}

fn delete_ranges(
    state: &BookingState,
    employee_id: EmployeeId,
    range_ids: BTreeSet<RangeId>,
    server_ranges: Vec<ServerRange>,
) -> Result<Transition, CoreError> {
    let booking: &EmployeeBooking = booking_for(state, employee_id)?;
    ensure_owner(state, employee_id)?;
    ensure_idle(state, booking)?;

    if let Some(missing) = range_ids
        .iter()
        .find(|id| booking.selection.get(**id).is_none())
    {
        return Err(CoreError::UnknownRange(*missing));
    }
    if let Some(missing) = server_ranges
        .iter()
        .find(|range| !booking.server_ranges.contains(range))
    {
        return Err(CoreError::UnknownServerRange {
            start: missing.start_date(),
            end: missing.end_date(),
        });
    }

    let mut new_state: BookingState = state.clone();

    if server_ranges.is_empty() {
        if let Some(booking) = new_state.employee_mut(employee_id) {
            let removed: usize = booking.selection.remove(&range_ids);
            info!(employee_id = %employee_id, removed, "Deleted local vacation ranges");
        }
        return Ok(Transition::settled(new_state));
    }

    let request_id: RequestId = new_state.allocate_request_id();
    let payload: DeleteRangesRequest = DeleteRangesRequest {
        employee_id,
        year: state.year,
        ranges: server_ranges.iter().map(RangePayload::from).collect(),
    };
    if let Some(booking) = new_state.employee_mut(employee_id) {
        booking.pending = Some(PendingRequest {
            request_id,
            kind: PendingKind::Delete,
            range_ids,
            server_ranges,
        });
    }

    info!(
        employee_id = %employee_id,
        year = state.year,
        request_id = %request_id,
        ranges = payload.ranges.len(),
        "Issuing delete request"
    );

    Ok(Transition {
        new_state,
        request: Some(PersistenceRequest::Delete {
            request_id,
            payload,
        }),
        surfaced: None,
    })
}

fn save(state: &BookingState, employee_id: EmployeeId, year: i32) -> Result<Transition, CoreError> {
    let booking: &EmployeeBooking = booking_for(state, employee_id)?;
    if booking.selection.is_empty() {
        return Err(CoreError::NothingToSave);
    }
    if year != state.year {
        return Err(CoreError::locked(LockReason::OutsideYear));
    }
    ensure_owner(state, employee_id)?;
    ensure_idle(state, booking)?;

    let payload: SaveRangesRequest = SaveRangesRequest {
        employee_id,
        year,
        ranges: booking
            .selection
            .ranges()
            .iter()
            .map(RangePayload::from)
            .collect(),
        status: RangeStatus::Draft,
    };
    let range_ids: BTreeSet<RangeId> = booking
        .selection
        .ranges()
        .iter()
        .map(|range| range.id)
        .collect();

    let mut new_state: BookingState = state.clone();
    let request_id: RequestId = new_state.allocate_request_id();
    if let Some(booking) = new_state.employee_mut(employee_id) {
        booking.pending = Some(PendingRequest {
            request_id,
            kind: PendingKind::Save,
            range_ids,
            server_ranges: Vec::new(),
        });
    }

    info!(
        employee_id = %employee_id,
        year,
        request_id = %request_id,
        ranges = payload.ranges.len(),
        "Issuing save request"
    );

    Ok(Transition {
        new_state,
        request: Some(PersistenceRequest::Save {
            request_id,
            payload,
        }),
        surfaced: None,
    })
}

/// Takes the pending request matching the completion, or `None` if stale.
fn take_pending(
    state: &mut BookingState,
    request_id: RequestId,
    employee_id: EmployeeId,
    year: i32,
) -> Option<PendingRequest> {
    if year != state.year {
        return None;
    }
    let booking: &mut EmployeeBooking = state.employee_mut(employee_id)?;
    if booking
        .pending
        .as_ref()
        .is_some_and(|pending| pending.request_id == request_id)
    {
        booking.pending.take()
    } else {
        None
    }
}

fn request_succeeded(
    state: &BookingState,
    request_id: RequestId,
    employee_id: EmployeeId,
    year: i32,
) -> Transition {
    let mut new_state: BookingState = state.clone();
    let Some(pending) = take_pending(&mut new_state, request_id, employee_id, year) else {
        debug!(
            employee_id = %employee_id,
            year,
            request_id = %request_id,
            "Discarding stale success response"
        );
        return Transition::settled(state.clone());
    };

    if let Some(booking) = new_state.employee_mut(employee_id) {
        booking.selection.remove(&pending.range_ids);
        if pending.kind == PendingKind::Delete {
            booking
                .server_ranges
                .retain(|range| !pending.server_ranges.contains(range));
        }
    }

    info!(
        employee_id = %employee_id,
        year,
        request_id = %request_id,
        kind = ?pending.kind,
        "Persistence request succeeded"
    );
    Transition::settled(new_state)
}

fn request_failed(
    state: &BookingState,
    request_id: RequestId,
    employee_id: EmployeeId,
    year: i32,
    reason: String,
) -> Transition {
    let mut new_state: BookingState = state.clone();
    if take_pending(&mut new_state, request_id, employee_id, year).is_none() {
        debug!(
            employee_id = %employee_id,
            year,
            request_id = %request_id,
            "Discarding stale failure response"
        );
        return Transition::settled(state.clone());
    }

    warn!(
        employee_id = %employee_id,
        year,
        request_id = %request_id,
        reason = %reason,
        "Persistence request failed; local ranges kept for retry"
    );
    Transition {
        new_state,
        request: None,
        surfaced: Some(CoreError::PersistenceFailure(reason)),
    }
}
