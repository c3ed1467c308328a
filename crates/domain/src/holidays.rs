// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{format_iso_date, parse_iso_date};
use crate::error::DomainError;
use std::collections::BTreeSet;
use time::Date;

/// Read-only set of public holidays.
///
/// The set is always replaced wholesale when the upstream list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<Date>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    /// Builds a set from ISO `YYYY-MM-DD` strings. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not a valid date.
    pub fn from_iso_strings<I, S>(values: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dates: BTreeSet<Date> = values
            .into_iter()
            .map(|value| parse_iso_date(value.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { dates })
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Holidays as ISO strings, ascending.
    #[must_use]
    pub fn to_iso_strings(&self) -> Vec<String> {
        self.dates.iter().map(|date| format_iso_date(*date)).collect()
    }
}

impl FromIterator<Date> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = Date>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Exact calendar-date membership test against the holiday set.
#[must_use]
pub fn is_public_holiday(date: Date, holidays: &HolidaySet) -> bool {
    holidays.contains(date)
}
