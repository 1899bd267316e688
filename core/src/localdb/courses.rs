// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::course::{Course, CourseId, RoomId, ScheduleDay, TeacherId};
use crate::datetime::{
    format_date, format_time, parse_date, parse_time, weekday_from_stored, weekday_to_stored,
};

#[derive(Debug, Clone)]
pub struct Courses {
    pool: SqlitePool,
}

impl Courses {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persists the course header and its schedule days atomically.
    ///
    /// This is the whole of save phase 1: its transaction is independent of
    /// the later session save and is never rolled back by it.
    pub async fn insert(&self, course: &Course) -> Result<(), sqlx::Error> {
        const INSERT_COURSE: &str = "\
INSERT INTO courses (id, name, start_date, end_date, room, teacher, status)
VALUES (?, ?, ?, ?, ?, ?, ?);
";
        const INSERT_DAY: &str = "\
INSERT INTO schedule_days (course_id, position, weekday, start_time, end_time)
VALUES (?, ?, ?, ?, ?);
";

        let mut tx = self.pool.begin().await?;

        sqlx::query(INSERT_COURSE)
            .bind(course.id.as_str())
            .bind(&course.name)
            .bind(format_date(course.start_date))
            .bind(format_date(course.end_date))
            .bind(course.room.as_str())
            .bind(course.teacher.as_str())
            .bind(course.status.as_ref())
            .execute(&mut *tx)
            .await?;

        for (position, day) in course.schedule_days.iter().enumerate() {
            sqlx::query(INSERT_DAY)
                .bind(course.id.as_str())
                .bind(position as i64)
                .bind(weekday_to_stored(day.weekday))
                .bind(format_time(day.start))
                .bind(format_time(day.end))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }

    pub async fn get(&self, id: &CourseId) -> Result<Option<Course>, sqlx::Error> {
        const SELECT_COURSE: &str = "\
SELECT id, name, start_date, end_date, room, teacher, status
FROM courses
WHERE id = ?;
";
        const SELECT_DAYS: &str = "\
SELECT weekday, start_time, end_time
FROM schedule_days
WHERE course_id = ?
ORDER BY position ASC;
";

        let record: Option<CourseRecord> = sqlx::query_as(SELECT_COURSE)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        let Some(record) = record else {
            return Ok(None);
        };

        let days: Vec<ScheduleDayRecord> = sqlx::query_as(SELECT_DAYS)
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(record.into_course(days)?))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRecord {
    id: String,
    name: String,
    start_date: String,
    end_date: String,
    room: String,
    teacher: String,
    status: String,
}

impl CourseRecord {
    fn into_course(self, days: Vec<ScheduleDayRecord>) -> Result<Course, sqlx::Error> {
        let schedule_days = days
            .into_iter()
            .map(ScheduleDayRecord::into_day)
            .collect::<Result<_, _>>()?;

        Ok(Course {
            id: CourseId::new(self.id),
            name: self.name,
            start_date: parse_date(&self.start_date).map_err(decode)?,
            end_date: parse_date(&self.end_date).map_err(decode)?,
            schedule_days,
            room: RoomId::new(self.room),
            teacher: TeacherId::new(self.teacher),
            status: self
                .status
                .parse()
                .map_err(|()| sqlx::Error::Decode(format!("unknown course status: {}", self.status).into()))?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduleDayRecord {
    weekday: i64,
    start_time: String,
    end_time: String,
}

impl ScheduleDayRecord {
    fn into_day(self) -> Result<ScheduleDay, sqlx::Error> {
        Ok(ScheduleDay {
            weekday: weekday_from_stored(self.weekday).map_err(decode)?,
            start: parse_time(&self.start_time).map_err(decode)?,
            end: parse_time(&self.end_time).map_err(decode)?,
        })
    }
}

fn decode(e: jiff::Error) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}
