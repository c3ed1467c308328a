// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request::RequestId;
use crate::selection::RangeId;
use std::collections::BTreeSet;
use time::Date;
use vacation_domain::{EmployeeId, ServerRange};

/// A command represents user or persistence intent as data only.
///
/// Commands are the only way to change booking state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCommand {
    /// Press on a calendar cell.
    StartDrag {
        employee_id: EmployeeId,
        date: Date,
    },
    /// Pointer moved over a calendar cell while pressed.
    ExtendDrag {
        employee_id: EmployeeId,
        date: Date,
    },
    /// Pointer released: materialize the drag span as a range.
    CommitDrag,
    /// Discard the drag without touching existing ranges.
    CancelDrag,
    /// Remove local ranges and, through persistence, committed ranges.
    DeleteRanges {
        employee_id: EmployeeId,
        range_ids: BTreeSet<RangeId>,
        server_ranges: Vec<ServerRange>,
    },
    /// Submit every local range as a draft.
    Save { employee_id: EmployeeId, year: i32 },
    /// Persistence confirmed a request.
    RequestSucceeded {
        request_id: RequestId,
        employee_id: EmployeeId,
        year: i32,
    },
    /// Persistence rejected a request.
    RequestFailed {
        request_id: RequestId,
        employee_id: EmployeeId,
        year: i32,
        reason: String,
    },
    /// Replace an employee's committed ranges with a fresh fetch.
    RefreshServerRanges {
        employee_id: EmployeeId,
        server_ranges: Vec<ServerRange>,
    },
}
