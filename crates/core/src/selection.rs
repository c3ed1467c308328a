// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Locally drafted vacation ranges for one employee.
//!
//! `EmployeeSelection` keeps its ranges and the union of their enumerated
//! dates side by side. Both are private and every mutation rebuilds the date
//! set from the ranges, so the two can never drift apart.

use std::collections::BTreeSet;
use time::Date;
use vacation_domain::{DateSpan, enumerate_dates, ordered, span_length};

/// Locally unique, monotonically assigned range identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeId(u64);

impl RangeId {
    /// Creates a new `RangeId`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive span of days drafted by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VacationRange {
    /// The range identifier.
    pub id: RangeId,
    /// First day of the range.
    pub start_date: Date,
    /// Last day of the range (inclusive).
    pub end_date: Date,
    /// Number of days covered, both endpoints included.
    pub day_count: u32,
}

impl VacationRange {
    /// Creates a range from two endpoints given in either order.
    #[must_use]
    pub fn new(id: RangeId, a: Date, b: Date) -> Self {
        let (start_date, end_date) = ordered(a, b);
        Self {
            id,
            start_date,
            end_date,
            day_count: span_length(start_date, end_date),
        }
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every day of the range in ascending order.
    #[must_use]
    pub fn dates(&self) -> DateSpan {
        enumerate_dates(self.start_date, self.end_date)
    }
}

/// The local ranges of one employee and their derived date set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeSelection {
    ranges: Vec<VacationRange>,
    selected_dates: BTreeSet<Date>,
}

impl EmployeeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ranges: Vec::new(),
            selected_dates: BTreeSet::new(),
        }
    }

    /// The ranges ordered by start date.
    #[must_use]
    pub fn ranges(&self) -> &[VacationRange] {
        &self.ranges
    }

    /// The union of every range's enumerated days.
    #[must_use]
    pub const fn selected_dates(&self) -> &BTreeSet<Date> {
        &self.selected_dates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of distinct days currently selected.
    #[must_use]
    pub fn total_selected_days(&self) -> u32 {
        u32::try_from(self.selected_dates.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        self.selected_dates.contains(&date)
    }

    #[must_use]
    pub fn get(&self, id: RangeId) -> Option<&VacationRange> {
        self.ranges.iter().find(|range| range.id == id)
    }

    /// The first range, by start date, that covers `date`.
    #[must_use]
    pub fn find_containing(&self, date: Date) -> Option<&VacationRange> {
        self.ranges.iter().find(|range| range.contains(date))
    }

    /// Distinct days selected by every range except `excluded`.
    ///
    /// With `None`, this equals [`Self::total_selected_days`].
    #[must_use]
    pub fn days_excluding(&self, excluded: Option<RangeId>) -> u32 {
        let Some(excluded) = excluded else {
            return self.total_selected_days();
        };

        let days: BTreeSet<Date> = self
            .ranges
            .iter()
            .filter(|range| range.id != excluded)
            .flat_map(VacationRange::dates)
            .collect();
        u32::try_from(days.len()).unwrap_or(u32::MAX)
    }

    /// Whether any range other than `excluded` shares a day with `start..=end`.
    #[must_use]
    pub fn overlaps_other(&self, start: Date, end: Date, excluded: Option<RangeId>) -> bool {
        self.ranges
            .iter()
            .filter(|range| Some(range.id) != excluded)
            .any(|range| range.start_date <= end && start <= range.end_date)
    }

    /// Inserts `range`, replacing any range with the same identifier.
    pub fn upsert(&mut self, range: VacationRange) {
        if let Some(existing) = self.ranges.iter_mut().find(|r| r.id == range.id) {
            *existing = range;
        } else {
            self.ranges.push(range);
        }
        self.recompute();
    }

    /// Removes every range whose identifier is in `ids`.
    ///
    /// # Returns
    ///
    /// The number of ranges removed.
    pub fn remove(&mut self, ids: &BTreeSet<RangeId>) -> usize {
        let before: usize = self.ranges.len();
        self.ranges.retain(|range| !ids.contains(&range.id));
        self.recompute();
        before - self.ranges.len()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.ranges
            .sort_by_key(|range| (range.start_date, range.end_date, range.id));
        self.selected_dates = self.ranges.iter().flat_map(VacationRange::dates).collect();
    }
}
