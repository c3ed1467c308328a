// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

/// Additional vacation days per year keyed by position title.
///
/// Consulted when a position interval carries no explicit additional-day
/// rate. Unknown titles map to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionRateTable {
    rates: HashMap<String, f64>,
}

impl PositionRateTable {
    /// Creates a table from explicit title/rate pairs.
    #[must_use]
    pub const fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// The organisation's standard table.
    #[must_use]
    pub fn standard() -> Self {
        [
            ("Начальник отдела", 10.0),
            ("Заместитель начальника отдела", 9.0),
            ("Консультант", 8.0),
            ("Главный специалист", 8.0),
            ("Старший специалист", 7.0),
            ("Ведущий специалист", 6.0),
            ("Специалист 1 категории", 5.0),
            ("Специалист", 0.0),
        ]
        .into_iter()
        .map(|(title, days)| (title.to_string(), days))
        .collect()
    }

    /// Additional days per year for `title`, or zero when unknown.
    #[must_use]
    pub fn additional_days_for(&self, title: &str) -> f64 {
        self.rates.get(title).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for PositionRateTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}
