// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::time::Duration;

use jiff::civil::{Date, Time, Weekday};
use thiserror::Error;

use crate::course::{CourseId, RoomId, TeacherId};
use crate::session::SessionRef;

/// Scheduling engine errors.
///
/// Conflicts and invalid schedule definitions are user-data errors and
/// propagate unmodified; storage failures are caught at the transaction
/// boundary they occurred in and re-signaled with the phase attached.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A candidate session overlaps an existing session in the same room.
    #[error("room {room} is already booked on {date} {start}-{end} by {existing}")]
    RoomConflict {
        room: RoomId,
        date: Date,
        start: Time,
        end: Time,
        existing: SessionRef,
    },

    /// A candidate session overlaps an existing session of the same teacher.
    #[error("teacher {teacher} is already booked on {date} {start}-{end} by {existing}")]
    TeacherConflict {
        teacher: TeacherId,
        date: Date,
        start: Time,
        end: Time,
        existing: SessionRef,
    },

    /// Malformed schedule definition, rejected before any persistence attempt.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] InvalidSchedule),

    /// The referenced course does not exist.
    #[error("course {0} not found")]
    CourseNotFound(CourseId),

    /// Underlying persistence failure in the named save phase.
    #[error("{phase} save failed: {source}")]
    Storage {
        phase: SavePhase,
        #[source]
        source: sqlx::Error,
    },

    /// The save transaction exceeded its bounded timeout and was rolled back.
    #[error("{phase} save timed out after {timeout:?}")]
    Timeout { phase: SavePhase, timeout: Duration },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database error outside the two save phases.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ScheduleError {
    pub(crate) fn course_save(source: sqlx::Error) -> Self {
        ScheduleError::Storage {
            phase: SavePhase::Course,
            source,
        }
    }

    pub(crate) fn session_save(source: sqlx::Error) -> Self {
        ScheduleError::Storage {
            phase: SavePhase::Sessions,
            source,
        }
    }

    /// Whether this error is a room or teacher double-booking.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ScheduleError::RoomConflict { .. } | ScheduleError::TeacherConflict { .. }
        )
    }
}

/// A malformed course schedule definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSchedule {
    #[error("course end date {end} is before start date {start}")]
    EndBeforeStart { start: Date, end: Date },

    #[error("course has no schedule days")]
    NoScheduleDays,

    #[error("schedule day on {weekday:?} has start {start} not before end {end}")]
    EmptyTimeSlot {
        weekday: Weekday,
        start: Time,
        end: Time,
    },

    #[error("candidate references schedule day {day}, but the course has {len}")]
    NoSuchScheduleDay { day: usize, len: usize },
}

/// The two independently-transacted steps of course creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    /// Phase 1: course header + schedule days.
    Course,

    /// Phase 2: generated class sessions.
    Sessions,
}

impl Display for SavePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavePhase::Course => write!(f, "course"),
            SavePhase::Sessions => write!(f, "session"),
        }
    }
}
