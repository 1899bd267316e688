// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

mod courses;
mod holidays;
pub(crate) mod sessions;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::error::ScheduleError;
use crate::localdb::courses::Courses;
use crate::localdb::holidays::Holidays;
use crate::localdb::sessions::Sessions;

pub(crate) use crate::localdb::sessions::TxAvailability;

const DB_NAME: &str = "lectern.db";

#[derive(Debug, Clone)]
pub(crate) struct LocalDb {
    pool: SqlitePool,

    pub courses: Courses,
    pub sessions: Sessions,
    pub holidays: Holidays,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `state_dir` is `None`, it opens an in-memory database.
    pub async fn open(state_dir: Option<&Path>) -> Result<Self, ScheduleError> {
        let options = if let Some(dir) = state_dir {
            tracing::info!(dir = %dir.display(), "connecting to SQLite database");
            let filename = dir.join(DB_NAME);
            let filename = filename
                .to_str()
                .ok_or_else(|| ScheduleError::Config("Invalid path encoding".into()))?;
            SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // A single connection serializes writers, so the availability check
        // and the session insert in one transaction cannot interleave with a
        // concurrent course creation.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(ScheduleError::Database)?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| ScheduleError::Database(e.into()))?;

        let courses = Courses::new(pool.clone());
        let sessions = Sessions::new(pool.clone());
        let holidays = Holidays::new(pool.clone());
        Ok(LocalDb {
            pool,
            courses,
            sessions,
            holidays,
        })
    }

    /// Begins a transaction for the session-save phase.
    pub async fn begin(&self) -> Result<Transaction<'_, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}
