// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use tokio::fs;
use tokio::time;

use crate::config::Config;
use crate::course::{Course, CourseId};
use crate::error::{SavePhase, ScheduleError};
use crate::generator::generate;
use crate::holiday::Holiday;
use crate::localdb::{LocalDb, TxAvailability, sessions};
use crate::recurrence::expand;
use crate::session::ClassSession;

/// Course persistence coordinator.
///
/// Orchestrates the two-phase save of a course and its generated sessions.
/// All collaborators (store, holiday registry) are owned explicitly; there is
/// no global state.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: Config,
    db: LocalDb,
}

impl Scheduler {
    /// Creates a new scheduler with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, ScheduleError> {
        config.normalize()?;

        if let Some(dir) = &config.state_dir {
            tracing::debug!(path = %dir.display(), "ensuring state directory exists");
            fs::create_dir_all(dir).await.map_err(|e| {
                ScheduleError::Config(format!("failed to create state directory: {e}"))
            })?;
        }

        let db = LocalDb::open(config.state_dir.as_deref()).await?;
        Ok(Self { config, db })
    }

    /// Creates a course and materializes its class sessions.
    ///
    /// Phase 1 persists the course header and schedule days in its own
    /// transaction. Phase 2 expands the recurring schedule, generates
    /// sessions against the availability index, and bulk-inserts them in an
    /// independent transaction bounded by the configured timeout.
    ///
    /// A phase-2 failure rolls back only phase 2: the course row stays
    /// persisted and the outcome is [`CreationOutcome::Partial`], a
    /// recoverable state an operator resolves via [`Self::retry_sessions`]
    /// or by editing the course. There is deliberately no compensating
    /// rollback of phase 1.
    ///
    /// Callers must not run two creations or retries for the same course
    /// identifier concurrently; the engine does not hold a per-course lock.
    #[tracing::instrument(skip(self, course), fields(course = %course.id))]
    pub async fn create_course(&self, course: Course) -> CreationOutcome {
        if let Err(cause) = course.validate() {
            tracing::warn!(%cause, "rejecting invalid schedule definition");
            return CreationOutcome::Failed {
                cause: cause.into(),
            };
        }

        // phase 1
        if let Err(e) = self.db.courses.insert(&course).await {
            tracing::warn!(error = %e, "course save failed, nothing persisted");
            return CreationOutcome::Failed {
                cause: ScheduleError::course_save(e),
            };
        }
        tracing::debug!("course header and schedule days saved");

        // phase 2
        match self.save_sessions(&course).await {
            Ok(sessions) => {
                tracing::info!(count = sessions.len(), "course created with sessions");
                CreationOutcome::Complete {
                    course_id: course.id,
                    sessions,
                }
            }
            Err(cause) => {
                tracing::warn!(%cause, "course saved but sessions failed");
                CreationOutcome::Partial {
                    course_id: course.id,
                    cause,
                }
            }
        }
    }

    /// Re-runs session generation for a course whose creation ended in
    /// [`CreationOutcome::Partial`].
    ///
    /// Clears any sessions the course already has inside the same
    /// transaction, so the regenerated set replaces rather than duplicates.
    #[tracing::instrument(skip(self))]
    pub async fn retry_sessions(
        &self,
        id: &CourseId,
    ) -> Result<Vec<ClassSession>, ScheduleError> {
        let course = self
            .db
            .courses
            .get(id)
            .await?
            .ok_or_else(|| ScheduleError::CourseNotFound(id.clone()))?;
        self.save_sessions(&course).await
    }

    /// Gets a course by its identifier.
    pub async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, ScheduleError> {
        Ok(self.db.courses.get(id).await?)
    }

    /// Lists the persisted sessions of a course, ordered by date and time.
    pub async fn list_sessions(
        &self,
        id: &CourseId,
    ) -> Result<Vec<ClassSession>, ScheduleError> {
        Ok(self.db.sessions.list_by_course(id).await?)
    }

    /// Registers a non-teaching day in the holiday registry.
    pub async fn add_holiday(&self, holiday: &Holiday) -> Result<(), ScheduleError> {
        Ok(self.db.holidays.insert(holiday).await?)
    }

    /// Closes the scheduler, releasing the database connection.
    pub async fn close(self) {
        self.db.close().await;
    }

    /// Phase 2 with its bounded timeout. The whole phase, holiday-calendar
    /// load included, runs inside the timed future; dropping it on expiry
    /// rolls the transaction back, so a stalled storage layer leaves no
    /// sessions.
    async fn save_sessions(&self, course: &Course) -> Result<Vec<ClassSession>, ScheduleError> {
        let limit = self.config.session_save_limit();
        match time::timeout(limit, self.save_sessions_in_tx(course)).await {
            Ok(result) => result,
            Err(_) => Err(ScheduleError::Timeout {
                phase: SavePhase::Sessions,
                timeout: limit,
            }),
        }
    }

    /// The availability check and the bulk insert share this transaction, so
    /// a concurrent course creation cannot slip a conflicting session in
    /// between them.
    async fn save_sessions_in_tx(
        &self,
        course: &Course,
    ) -> Result<Vec<ClassSession>, ScheduleError> {
        let calendar = self
            .db
            .holidays
            .calendar()
            .await
            .map_err(ScheduleError::session_save)?;

        let mut tx = self.db.begin().await.map_err(ScheduleError::session_save)?;

        sessions::delete_by_course(&mut tx, &course.id)
            .await
            .map_err(ScheduleError::session_save)?;

        let candidates = expand(
            course.start_date,
            course.end_date,
            &course.schedule_days,
            &calendar,
        );

        let mut index = TxAvailability::new(&mut tx);
        let generated = generate(course, candidates, &mut index).await?;
        drop(index);

        sessions::bulk_insert(&mut tx, &generated)
            .await
            .map_err(ScheduleError::session_save)?;

        tx.commit().await.map_err(ScheduleError::session_save)?;
        Ok(generated)
    }
}

/// Terminal outcome of [`Scheduler::create_course`].
///
/// The three variants map to the three messages a caller must render: full
/// success, "course saved but sessions failed" (requires manual follow-up),
/// and "course creation failed".
#[derive(Debug)]
pub enum CreationOutcome {
    /// Course saved and all sessions saved.
    Complete {
        course_id: CourseId,
        sessions: Vec<ClassSession>,
    },

    /// Course saved, but session generation or persistence failed; zero
    /// sessions exist. Recoverable via [`Scheduler::retry_sessions`].
    Partial {
        course_id: CourseId,
        cause: ScheduleError,
    },

    /// Course save itself failed; nothing persisted.
    Failed { cause: ScheduleError },
}

impl CreationOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, CreationOutcome::Complete { .. })
    }

    /// The failure cause, if any.
    pub fn cause(&self) -> Option<&ScheduleError> {
        match self {
            CreationOutcome::Complete { .. } => None,
            CreationOutcome::Partial { cause, .. } | CreationOutcome::Failed { cause } => {
                Some(cause)
            }
        }
    }
}
