// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{course, in_memory_scheduler, mwf_course, one_shot_course, slot};
