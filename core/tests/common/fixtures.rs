// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use jiff::civil::{Date, Time, Weekday, date, time};
use lectern_core::{
    Config, Course, CourseId, CourseStatus, RoomId, ScheduleDay, Scheduler, TeacherId,
};

/// A scheduler backed by an in-memory database.
pub async fn in_memory_scheduler() -> Scheduler {
    Scheduler::new(Config::default())
        .await
        .expect("failed to create in-memory scheduler")
}

/// An 08:00-10:00 slot on the given weekday.
#[must_use]
pub fn slot(weekday: Weekday) -> ScheduleDay {
    ScheduleDay::new(weekday, time(8, 0, 0, 0), time(10, 0, 0, 0))
}

/// A course with the given identity, date range, and schedule days.
#[must_use]
pub fn course(
    id: &str,
    room: &str,
    teacher: &str,
    start_date: Date,
    end_date: Date,
    schedule_days: Vec<ScheduleDay>,
) -> Course {
    Course {
        id: CourseId::new(id),
        name: format!("Course {id}"),
        start_date,
        end_date,
        schedule_days,
        room: RoomId::new(room),
        teacher: TeacherId::new(teacher),
        status: CourseStatus::Planned,
    }
}

/// A Mon/Wed/Fri course running 2024-01-01 (a Monday) through
/// 2024-01-12 (a Friday), 08:00-10:00.
#[must_use]
pub fn mwf_course(id: &str, room: &str, teacher: &str) -> Course {
    course(
        id,
        room,
        teacher,
        date(2024, 1, 1),
        date(2024, 1, 12),
        vec![
            slot(Weekday::Monday),
            slot(Weekday::Wednesday),
            slot(Weekday::Friday),
        ],
    )
}

/// A single-day course reserving one room/teacher slot.
#[must_use]
pub fn one_shot_course(
    id: &str,
    room: &str,
    teacher: &str,
    on: Date,
    start: Time,
    end: Time,
) -> Course {
    course(
        id,
        room,
        teacher,
        on,
        on,
        vec![ScheduleDay::new(on.weekday(), start, end)],
    )
}
