// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Each function performs its statements on the given connection. Callers in
//! `lib.rs` wrap them in a transaction so a failure leaves nothing behind.

pub mod employees;
pub mod holidays;
pub mod vacations;
