// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::datetime::{format_date, parse_date};
use crate::holiday::{Holiday, HolidayCalendar};

#[derive(Debug, Clone)]
pub struct Holidays {
    pool: SqlitePool,
}

impl Holidays {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, holiday: &Holiday) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO holidays (date, month, day, name)
VALUES (?, ?, ?, ?);
";

        let (date, month, day, name) = match holiday {
            Holiday::Fixed { date, name } => (Some(format_date(*date)), None, None, name),
            Holiday::Yearly { month, day, name } => {
                (None, Some(i64::from(*month)), Some(i64::from(*day)), name)
            }
        };

        sqlx::query(SQL)
            .bind(date)
            .bind(month)
            .bind(day)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Loads the whole registry into an in-memory oracle for expansion.
    pub async fn calendar(&self) -> Result<HolidayCalendar, sqlx::Error> {
        const SQL: &str = "SELECT date, month, day, name FROM holidays;";

        let records: Vec<HolidayRecord> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;

        let mut calendar = HolidayCalendar::default();
        for record in records {
            match record.into_holiday()? {
                Some(holiday) => calendar.add(holiday),
                None => tracing::warn!("skipping holiday row with neither date nor month/day"),
            }
        }
        Ok(calendar)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HolidayRecord {
    date: Option<String>,
    month: Option<i64>,
    day: Option<i64>,
    name: String,
}

impl HolidayRecord {
    fn into_holiday(self) -> Result<Option<Holiday>, sqlx::Error> {
        if let Some(date) = self.date {
            let date = parse_date(&date).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            return Ok(Some(Holiday::fixed(date, self.name)));
        }
        match (self.month, self.day) {
            (Some(month), Some(day)) => Ok(Some(Holiday::yearly(month as i8, day as i8, self.name))),
            _ => Ok(None),
        }
    }
}
