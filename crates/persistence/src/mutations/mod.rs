// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Single-statement mutations are generated by `backend_fn!`. Multi-step
//! operations (role deletion, tier list replacement) call other
//! backend-specific functions inside a transaction and are written out once
//! per backend.

pub mod contributors;
pub mod roles;
pub mod tier_list;
pub mod weapons;
