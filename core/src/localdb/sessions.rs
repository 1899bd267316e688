// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use jiff::civil::{Date, Time};
use sqlx::{SqliteConnection, SqlitePool};

use crate::availability::AvailabilityIndex;
use crate::course::{CourseId, RoomId, TeacherId};
use crate::datetime::{format_date, format_time, parse_date, parse_time};
use crate::session::{ClassSession, SessionId, SessionRef};

#[derive(Debug, Clone)]
pub struct Sessions {
    pool: SqlitePool,
}

impl Sessions {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_course(&self, id: &CourseId) -> Result<Vec<ClassSession>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, course_id, date, start_time, end_time, room, teacher, status
FROM sessions
WHERE course_id = ?
ORDER BY date ASC, start_time ASC, id ASC;
";

        let records: Vec<SessionRecord> = sqlx::query_as(SQL)
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await?;

        records.into_iter().map(SessionRecord::into_session).collect()
    }

}

/// Inserts generated sessions within the caller's transaction.
pub(crate) async fn bulk_insert(
    conn: &mut SqliteConnection,
    sessions: &[ClassSession],
) -> Result<(), sqlx::Error> {
    const SQL: &str = "\
INSERT INTO sessions (id, course_id, date, start_time, end_time, room, teacher, status)
VALUES (?, ?, ?, ?, ?, ?, ?, ?);
";

    for session in sessions {
        sqlx::query(SQL)
            .bind(session.id.as_str())
            .bind(session.course_id.as_str())
            .bind(format_date(session.date))
            .bind(format_time(session.start))
            .bind(format_time(session.end))
            .bind(session.room.as_str())
            .bind(session.teacher.as_str())
            .bind(session.status.as_ref())
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Clears a course's sessions within the caller's transaction, so a retry
/// after a partial save regenerates from scratch.
pub(crate) async fn delete_by_course(
    conn: &mut SqliteConnection,
    id: &CourseId,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE course_id = ?;")
        .bind(id.as_str())
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_ROOM_OVERLAP: &str = "\
SELECT id, course_id
FROM sessions
WHERE room = ? AND date = ? AND status = 'SCHEDULED'
  AND start_time < ? AND end_time > ?
ORDER BY id ASC
LIMIT 1;
";

const SQL_TEACHER_OVERLAP: &str = "\
SELECT id, course_id
FROM sessions
WHERE teacher = ? AND date = ? AND status = 'SCHEDULED'
  AND start_time < ? AND end_time > ?
ORDER BY id ASC
LIMIT 1;
";

/// Availability lookups running on the phase-2 transaction connection, so
/// the overlap check and the subsequent bulk insert share one consistency
/// scope.
#[derive(Debug)]
pub(crate) struct TxAvailability<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TxAvailability<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AvailabilityIndex for TxAvailability<'_> {
    async fn room_overlap(
        &mut self,
        room: &RoomId,
        date: Date,
        start: Time,
        end: Time,
    ) -> Result<Option<SessionRef>, sqlx::Error> {
        let row: Option<(String, String)> = sqlx::query_as(SQL_ROOM_OVERLAP)
            .bind(room.as_str())
            .bind(format_date(date))
            .bind(format_time(end))
            .bind(format_time(start))
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(session_ref))
    }

    async fn teacher_overlap(
        &mut self,
        teacher: &TeacherId,
        date: Date,
        start: Time,
        end: Time,
    ) -> Result<Option<SessionRef>, sqlx::Error> {
        let row: Option<(String, String)> = sqlx::query_as(SQL_TEACHER_OVERLAP)
            .bind(teacher.as_str())
            .bind(format_date(date))
            .bind(format_time(end))
            .bind(format_time(start))
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(session_ref))
    }
}

fn session_ref((session, course): (String, String)) -> SessionRef {
    SessionRef {
        session: SessionId::new(session),
        course: CourseId::new(course),
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRecord {
    id: String,
    course_id: String,
    date: String,
    start_time: String,
    end_time: String,
    room: String,
    teacher: String,
    status: String,
}

impl SessionRecord {
    fn into_session(self) -> Result<ClassSession, sqlx::Error> {
        Ok(ClassSession {
            id: SessionId::new(self.id),
            course_id: CourseId::new(self.course_id),
            date: parse_date(&self.date).map_err(decode)?,
            start: parse_time(&self.start_time).map_err(decode)?,
            end: parse_time(&self.end_time).map_err(decode)?,
            room: RoomId::new(self.room),
            teacher: TeacherId::new(self.teacher),
            status: self
                .status
                .parse()
                .map_err(|()| sqlx::Error::Decode(format!("unknown session status: {}", self.status).into()))?,
        })
    }
}

fn decode(e: jiff::Error) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}
