// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `employees`: employee rows with their position history
//! - `vacations`: committed range sets and ranges
//! - `holidays`: the public holiday table

pub mod employees;
pub mod holidays;
pub mod vacations;
