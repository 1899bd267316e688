// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use jiff::civil::{Date, Time, Weekday};
use uuid::Uuid;

use crate::error::InvalidSchedule;

/// The unique identifier of a course.
///
/// Callers may pre-assign an identifier or generate a random one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseId(String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random course identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The identifier of a classroom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The identifier of a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeacherId(String);

impl TeacherId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeacherId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A recurring weekday + time-of-day window on which a course regularly meets.
///
/// Owned exclusively by its [`Course`]; it has no independent lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDay {
    pub weekday: Weekday,

    /// Start time of day, inclusive.
    pub start: Time,

    /// End time of day, must be after `start`.
    pub end: Time,
}

impl ScheduleDay {
    pub fn new(weekday: Weekday, start: Time, end: Time) -> Self {
        Self {
            weekday,
            start,
            end,
        }
    }
}

/// A course with its recurring weekly schedule.
///
/// Plain immutable value struct; any change notification toward a UI layer
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub schedule_days: Vec<ScheduleDay>,
    pub room: RoomId,
    pub teacher: TeacherId,
    pub status: CourseStatus,
}

impl Course {
    /// Validates the schedule definition.
    ///
    /// Rejected courses never reach persistence; the coordinator calls this
    /// before opening any transaction.
    pub fn validate(&self) -> Result<(), InvalidSchedule> {
        if self.end_date < self.start_date {
            return Err(InvalidSchedule::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if self.schedule_days.is_empty() {
            return Err(InvalidSchedule::NoScheduleDays);
        }

        for day in &self.schedule_days {
            if day.start >= day.end {
                return Err(InvalidSchedule::EmptyTimeSlot {
                    weekday: day.weekday,
                    start: day.start,
                    end: day.end,
                });
            }
        }

        Ok(())
    }
}

/// The status of a course.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    /// The course is planned but not yet running.
    #[default]
    Planned,

    /// The course is running.
    Active,

    /// The course is cancelled.
    Cancelled,
}

const STATUS_PLANNED: &str = "PLANNED";
const STATUS_ACTIVE: &str = "ACTIVE";
const STATUS_CANCELLED: &str = "CANCELLED";

impl AsRef<str> for CourseStatus {
    fn as_ref(&self) -> &str {
        match self {
            CourseStatus::Planned => STATUS_PLANNED,
            CourseStatus::Active => STATUS_ACTIVE,
            CourseStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for CourseStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_PLANNED => Ok(CourseStatus::Planned),
            STATUS_ACTIVE => Ok(CourseStatus::Active),
            STATUS_CANCELLED => Ok(CourseStatus::Cancelled),
            _ => Err(()),
        }
    }
}
