// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use crate::availability::AvailabilityIndex;
use crate::course::Course;
use crate::error::{InvalidSchedule, ScheduleError};
use crate::recurrence::Candidate;
use crate::session::{ClassSession, SessionId, SessionStatus};

/// Builds class sessions from candidate dates, checking room and teacher
/// availability for each.
///
/// Walks candidates in order; the first overlap aborts generation with a
/// [`ScheduleError::RoomConflict`] or [`ScheduleError::TeacherConflict`]
/// naming the offending date, resource, and existing session, and the caller
/// discards everything (all-or-nothing). Session identifiers are derived
/// from the course id and the sequence index, so re-running generation is
/// idempotent in identifier space; it does NOT deduplicate against already
/// persisted sessions, callers must clear those first.
///
/// Zero candidates is a success with an empty list, not an error.
pub async fn generate<I, A>(
    course: &Course,
    candidates: I,
    index: &mut A,
) -> Result<Vec<ClassSession>, ScheduleError>
where
    I: IntoIterator<Item = Candidate>,
    A: AvailabilityIndex + ?Sized,
{
    let mut sessions = Vec::new();

    for (seq, candidate) in candidates.into_iter().enumerate() {
        // candidates must come from expanding this course's schedule days
        let Some(day) = course.schedule_days.get(candidate.day) else {
            return Err(InvalidSchedule::NoSuchScheduleDay {
                day: candidate.day,
                len: course.schedule_days.len(),
            }
            .into());
        };

        let occupied = index
            .room_overlap(&course.room, candidate.date, day.start, day.end)
            .await
            .map_err(ScheduleError::session_save)?;
        if let Some(existing) = occupied {
            return Err(ScheduleError::RoomConflict {
                room: course.room.clone(),
                date: candidate.date,
                start: day.start,
                end: day.end,
                existing,
            });
        }

        let occupied = index
            .teacher_overlap(&course.teacher, candidate.date, day.start, day.end)
            .await
            .map_err(ScheduleError::session_save)?;
        if let Some(existing) = occupied {
            return Err(ScheduleError::TeacherConflict {
                teacher: course.teacher.clone(),
                date: candidate.date,
                start: day.start,
                end: day.end,
                existing,
            });
        }

        sessions.push(ClassSession {
            id: SessionId::derived(&course.id, seq),
            course_id: course.id.clone(),
            date: candidate.date,
            start: day.start,
            end: day.end,
            room: course.room.clone(),
            teacher: course.teacher.clone(),
            status: SessionStatus::Scheduled,
        });
    }

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use jiff::civil::{Date, Time, Weekday, date, time};

    use crate::course::{CourseId, CourseStatus, RoomId, ScheduleDay, TeacherId};
    use crate::holiday::HolidayCalendar;
    use crate::recurrence::{Candidate, expand};
    use crate::session::SessionRef;

    use super::*;

    /// In-memory availability backed by a fixed list of occupied slots.
    #[derive(Default)]
    struct FakeIndex {
        rooms: Vec<(RoomId, Date, Time, Time, SessionRef)>,
        teachers: Vec<(TeacherId, Date, Time, Time, SessionRef)>,
    }

    #[async_trait]
    impl AvailabilityIndex for FakeIndex {
        async fn room_overlap(
            &mut self,
            room: &RoomId,
            date: Date,
            start: Time,
            end: Time,
        ) -> Result<Option<SessionRef>, sqlx::Error> {
            Ok(self
                .rooms
                .iter()
                .find(|(r, d, s, e, _)| r == room && *d == date && *s < end && *e > start)
                .map(|(_, _, _, _, existing)| existing.clone()))
        }

        async fn teacher_overlap(
            &mut self,
            teacher: &TeacherId,
            date: Date,
            start: Time,
            end: Time,
        ) -> Result<Option<SessionRef>, sqlx::Error> {
            Ok(self
                .teachers
                .iter()
                .find(|(t, d, s, e, _)| t == teacher && *d == date && *s < end && *e > start)
                .map(|(_, _, _, _, existing)| existing.clone()))
        }
    }

    fn mwf_course() -> Course {
        Course {
            id: CourseId::new("math-101"),
            name: "Mathematics".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 12),
            schedule_days: vec![
                ScheduleDay::new(Weekday::Monday, time(8, 0, 0, 0), time(10, 0, 0, 0)),
                ScheduleDay::new(Weekday::Wednesday, time(8, 0, 0, 0), time(10, 0, 0, 0)),
                ScheduleDay::new(Weekday::Friday, time(8, 0, 0, 0), time(10, 0, 0, 0)),
            ],
            room: RoomId::new("101"),
            teacher: TeacherId::new("turing"),
            status: CourseStatus::Planned,
        }
    }

    fn existing_session() -> SessionRef {
        SessionRef {
            session: crate::session::SessionId::new("phys-202-001"),
            course: CourseId::new("phys-202"),
        }
    }

    #[tokio::test]
    async fn generates_a_session_per_candidate() {
        let course = mwf_course();
        let calendar = HolidayCalendar::default();
        let candidates = expand(
            course.start_date,
            course.end_date,
            &course.schedule_days,
            &calendar,
        );
        let mut index = FakeIndex::default();

        let sessions = generate(&course, candidates, &mut index).await.unwrap();

        assert_eq!(sessions.len(), 6);
        assert_eq!(sessions[0].id.as_str(), "math-101-000");
        assert_eq!(sessions[5].id.as_str(), "math-101-005");
        for session in &sessions {
            assert_eq!(session.course_id, course.id);
            assert_eq!(session.room, course.room);
            assert_eq!(session.teacher, course.teacher);
            assert_eq!(session.status, SessionStatus::Scheduled);
        }
    }

    #[tokio::test]
    async fn room_overlap_stops_generation_with_room_conflict() {
        let course = mwf_course();
        let calendar = HolidayCalendar::default();
        let candidates = expand(
            course.start_date,
            course.end_date,
            &course.schedule_days,
            &calendar,
        );
        let mut index = FakeIndex::default();
        index.rooms.push((
            RoomId::new("101"),
            date(2024, 1, 3),
            time(9, 0, 0, 0),
            time(11, 0, 0, 0),
            existing_session(),
        ));

        let err = generate(&course, candidates, &mut index).await.unwrap_err();

        match err {
            ScheduleError::RoomConflict {
                room,
                date: conflict_date,
                existing,
                ..
            } => {
                assert_eq!(room, RoomId::new("101"));
                assert_eq!(conflict_date, date(2024, 1, 3));
                assert_eq!(existing, existing_session());
            }
            other => panic!("expected RoomConflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn teacher_overlap_is_a_distinct_conflict_kind() {
        let course = mwf_course();
        let calendar = HolidayCalendar::default();
        let candidates = expand(
            course.start_date,
            course.end_date,
            &course.schedule_days,
            &calendar,
        );
        let mut index = FakeIndex::default();
        // the teacher is busy in a different room at the same hour
        index.teachers.push((
            TeacherId::new("turing"),
            date(2024, 1, 1),
            time(8, 0, 0, 0),
            time(9, 0, 0, 0),
            existing_session(),
        ));

        let err = generate(&course, candidates, &mut index).await.unwrap_err();
        assert!(matches!(err, ScheduleError::TeacherConflict { .. }));
    }

    #[tokio::test]
    async fn adjacent_intervals_do_not_conflict() {
        let course = mwf_course();
        let calendar = HolidayCalendar::default();
        let candidates = expand(
            course.start_date,
            course.end_date,
            &course.schedule_days,
            &calendar,
        );
        let mut index = FakeIndex::default();
        // back-to-back booking ending exactly when the course starts
        index.rooms.push((
            RoomId::new("101"),
            date(2024, 1, 1),
            time(6, 0, 0, 0),
            time(8, 0, 0, 0),
            existing_session(),
        ));

        let sessions = generate(&course, candidates, &mut index).await.unwrap();
        assert_eq!(sessions.len(), 6);
    }

    #[tokio::test]
    async fn candidate_past_the_schedule_days_is_rejected() {
        let course = mwf_course();
        let mut index = FakeIndex::default();
        let stray = Candidate {
            date: date(2024, 1, 1),
            day: course.schedule_days.len(),
        };

        let err = generate(&course, [stray], &mut index).await.unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidSchedule(InvalidSchedule::NoSuchScheduleDay { day: 3, len: 3 })
        ));
    }

    #[tokio::test]
    async fn zero_candidates_is_an_empty_success() {
        let course = mwf_course();
        let mut index = FakeIndex::default();

        let sessions = generate(&course, [], &mut index).await.unwrap();
        assert!(sessions.is_empty());
    }
}
