// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use jiff::civil::{Date, Time};

use crate::course::{RoomId, TeacherId};
use crate::session::SessionRef;

/// Answers whether an existing session already occupies a room or teacher on
/// a given date and time interval.
///
/// Occupancy is derived by scanning persisted sessions; it is never stored
/// independently. The production implementation queries the session table
/// inside the phase-2 transaction, so the check and the subsequent insert
/// share one consistency scope and concurrent course creations cannot both
/// pass the check.
#[async_trait]
pub trait AvailabilityIndex {
    /// The first persisted session overlapping `[start, end)` in `room` on
    /// `date`, if any.
    async fn room_overlap(
        &mut self,
        room: &RoomId,
        date: Date,
        start: Time,
        end: Time,
    ) -> Result<Option<SessionRef>, sqlx::Error>;

    /// The first persisted session overlapping `[start, end)` held by
    /// `teacher` on `date`, if any.
    async fn teacher_overlap(
        &mut self,
        teacher: &TeacherId,
        date: Date,
        start: Time,
        end: Time,
    ) -> Result<Option<SessionRef>, sqlx::Error>;
}
