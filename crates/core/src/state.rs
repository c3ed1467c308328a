// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, LockReason};
use crate::request::{PersistenceRequest, RequestId};
use crate::selection::{EmployeeSelection, RangeId};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use vacation_domain::{AccrualMode, EmployeeId, ServerRange, add_months, ordered, span_length};

/// Default length of the post-hire probation window.
pub const DEFAULT_PROBATION_MONTHS: u8 = 6;

/// Rules applied when building and operating a booking board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Months after hire during which no vacation may be booked.
    pub probation_months: u8,
    /// Accrual algorithm used to cap each employee's selection.
    pub accrual_mode: AccrualMode,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            probation_months: DEFAULT_PROBATION_MONTHS,
            accrual_mode: AccrualMode::Exact,
        }
    }
}

/// A drag gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    /// The employee whose row is being edited.
    pub employee_id: EmployeeId,
    /// The fixed end of the span.
    pub anchor: Date,
    /// First day of the current span.
    pub span_start: Date,
    /// Last day of the current span.
    pub span_end: Date,
    /// The local range being reshaped, if the drag started inside one.
    pub editing: Option<RangeId>,
}

impl ActiveDrag {
    #[must_use]
    pub fn span_length(&self) -> u32 {
        span_length(self.span_start, self.span_end)
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.span_start <= date && date <= self.span_end
    }

    /// Copy of this drag with the span stretched between the anchor and `date`.
    #[must_use]
    pub fn stretched_to(&self, date: Date) -> Self {
        let (span_start, span_end) = ordered(self.anchor, date);
        Self {
            span_start,
            span_end,
            ..*self
        }
    }
}

/// The pointer gesture state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl DragState {
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag),
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

/// Which kind of request is awaiting completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Save,
    Delete,
}

/// A request issued to persistence and not yet completed.
///
/// Carries what must happen locally once persistence confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub kind: PendingKind,
    /// Local ranges to drop on success.
    pub range_ids: BTreeSet<RangeId>,
    /// Committed ranges to drop on success.
    pub server_ranges: Vec<ServerRange>,
}

/// Booking state of one employee within the board's year.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeBooking {
    pub employee_id: EmployeeId,
    pub hire_date: Date,
    /// First day after the probation window.
    pub probation_end: Date,
    /// Days the employee may select in this year.
    pub entitlement_days: f64,
    /// Committed ranges for this year.
    pub server_ranges: Vec<ServerRange>,
    pub selection: EmployeeSelection,
    pub pending: Option<PendingRequest>,
}

impl EmployeeBooking {
    /// Creates a booking with an empty local selection.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee
    /// * `hire_date` - The employee's hire date
    /// * `probation_months` - Length of the probation window
    /// * `entitlement_days` - Days the employee may select
    /// * `server_ranges` - Committed ranges for the board's year
    ///
    /// # Errors
    ///
    /// Returns an error if the probation end cannot be represented.
    pub fn new(
        employee_id: EmployeeId,
        hire_date: Date,
        probation_months: u8,
        entitlement_days: f64,
        mut server_ranges: Vec<ServerRange>,
    ) -> Result<Self, CoreError> {
        let probation_end: Date = add_months(hire_date, probation_months)?;
        server_ranges.sort();
        Ok(Self {
            employee_id,
            hire_date,
            probation_end,
            entitlement_days,
            server_ranges,
            selection: EmployeeSelection::new(),
            pending: None,
        })
    }

    #[must_use]
    pub fn is_in_server_range(&self, date: Date) -> bool {
        self.server_ranges.iter().any(|range| range.contains(date))
    }

    /// Whether any day of `[start, end]` is committed.
    #[must_use]
    pub fn overlaps_server_range(&self, start: Date, end: Date) -> bool {
        self.server_ranges
            .iter()
            .any(|range| range.overlaps(start, end))
    }

    /// The hire or probation lock covering `date`, if any.
    #[must_use]
    pub fn tenure_lock(&self, date: Date) -> Option<LockReason> {
        if date < self.hire_date {
            Some(LockReason::BeforeHire)
        } else if date < self.probation_end {
            Some(LockReason::Probation)
        } else {
            None
        }
    }
}

/// The booking board: every employee's bookings for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    /// The year being booked.
    pub year: i32,
    /// The authenticated employee. Only this row is editable.
    pub current_user: Option<EmployeeId>,
    pub rules: BookingRules,
    pub drag: DragState,
    employees: BTreeMap<EmployeeId, EmployeeBooking>,
    next_range_id: u64,
    next_request_id: u64,
}

impl BookingState {
    /// Creates an empty board.
    #[must_use]
    pub const fn new(year: i32, current_user: Option<EmployeeId>, rules: BookingRules) -> Self {
        Self {
            year,
            current_user,
            rules,
            drag: DragState::Idle,
            employees: BTreeMap::new(),
            next_range_id: 1,
            next_request_id: 1,
        }
    }

    /// Adds or replaces an employee's booking.
    pub fn insert_employee(&mut self, booking: EmployeeBooking) {
        self.employees.insert(booking.employee_id, booking);
    }

    #[must_use]
    pub fn employee(&self, employee_id: EmployeeId) -> Option<&EmployeeBooking> {
        self.employees.get(&employee_id)
    }

    pub(crate) fn employee_mut(&mut self, employee_id: EmployeeId) -> Option<&mut EmployeeBooking> {
        self.employees.get_mut(&employee_id)
    }

    pub fn employees(&self) -> impl Iterator<Item = &EmployeeBooking> {
        self.employees.values()
    }

    /// Takes the next range identifier.
    pub(crate) const fn allocate_range_id(&mut self) -> RangeId {
        let id: RangeId = RangeId::new(self.next_range_id);
        self.next_range_id += 1;
        id
    }

    /// Takes the next request identifier.
    pub(crate) const fn allocate_request_id(&mut self) -> RequestId {
        let id: RequestId = RequestId::new(self.next_request_id);
        self.next_request_id += 1;
        id
    }

    /// The request awaiting completion for `employee_id`, if any.
    #[must_use]
    pub fn pending_request(&self, employee_id: EmployeeId) -> Option<&PendingRequest> {
        self.employee(employee_id)
            .and_then(|booking| booking.pending.as_ref())
    }

    /// Why the current session cannot edit `date` on `employee_id`'s row.
    ///
    /// Returns `None` for an editable cell. Unknown employees are reported as
    /// not owned.
    #[must_use]
    pub fn lock_reason(&self, employee_id: EmployeeId, date: Date) -> Option<LockReason> {
        if self.current_user != Some(employee_id) {
            return Some(LockReason::NotOwner);
        }
        let Some(booking) = self.employee(employee_id) else {
            return Some(LockReason::NotOwner);
        };
        if date.year() != self.year {
            return Some(LockReason::OutsideYear);
        }
        if let Some(reason) = booking.tenure_lock(date) {
            return Some(reason);
        }
        if booking.is_in_server_range(date) {
            return Some(LockReason::ServerConfirmed);
        }
        None
    }

    #[must_use]
    pub fn is_in_server_range(&self, employee_id: EmployeeId, date: Date) -> bool {
        self.employee(employee_id)
            .is_some_and(|booking| booking.is_in_server_range(date))
    }

    #[must_use]
    pub fn is_in_local_range(&self, employee_id: EmployeeId, date: Date) -> bool {
        self.employee(employee_id)
            .is_some_and(|booking| booking.selection.contains_date(date))
    }

    #[must_use]
    pub fn is_in_active_drag(&self, employee_id: EmployeeId, date: Date) -> bool {
        self.drag
            .active()
            .is_some_and(|drag| drag.employee_id == employee_id && drag.contains(date))
    }

    /// Not before hire, not in probation, not committed, and on the current
    /// user's row inside the booking year.
    #[must_use]
    pub fn is_selectable(&self, employee_id: EmployeeId, date: Date) -> bool {
        self.lock_reason(employee_id, date).is_none()
    }

    /// Whether `request` is what `employee_id` is currently waiting on.
    #[must_use]
    pub fn is_awaiting(&self, request: &PersistenceRequest) -> bool {
        request.year() == self.year
            && self
                .pending_request(request.employee_id())
                .is_some_and(|pending| pending.request_id == request.request_id())
    }
}
