// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use jiff::civil::{Date, Time};

use crate::course::{CourseId, RoomId, TeacherId};

/// The unique identifier of a class session.
///
/// Derived deterministically from the owning course and the position of the
/// session in generation order, so re-running generation for the same course
/// yields the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier of the `seq`-th session of a course.
    pub fn derived(course: &CourseId, seq: usize) -> Self {
        Self(format!("{course}-{seq:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One concrete, dated occurrence of a course's meeting.
///
/// Created only by the session generator; the date always falls within the
/// course's date range, matches one of its schedule days, and is not a
/// holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSession {
    pub id: SessionId,
    pub course_id: CourseId,
    pub date: Date,
    pub start: Time,
    pub end: Time,
    pub room: RoomId,
    pub teacher: TeacherId,
    pub status: SessionStatus,
}

/// A reference to an already-persisted session, as reported by conflict
/// detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRef {
    pub session: SessionId,
    pub course: CourseId,
}

impl Display for SessionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session {} of course {}", self.session, self.course)
    }
}

/// The status of a class session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The session is scheduled to take place.
    #[default]
    Scheduled,

    /// The session is cancelled.
    Cancelled,
}

const STATUS_SCHEDULED: &str = "SCHEDULED";
const STATUS_CANCELLED: &str = "CANCELLED";

impl AsRef<str> for SessionStatus {
    fn as_ref(&self) -> &str {
        match self {
            SessionStatus::Scheduled => STATUS_SCHEDULED,
            SessionStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for SessionStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_SCHEDULED => Ok(SessionStatus::Scheduled),
            STATUS_CANCELLED => Ok(SessionStatus::Cancelled),
            _ => Err(()),
        }
    }
}
