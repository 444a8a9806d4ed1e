// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function exists in a `_sqlite` and a `_mysql` flavour generated by
//! `backend_fn!`. The `Persistence` adapter in `lib.rs` picks one.

pub mod contributors;
pub mod roles;
pub mod tier_list;
pub mod weapons;
