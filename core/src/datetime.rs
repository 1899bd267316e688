// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time, Weekday};

/// NOTE: Used for storing in the database, so it must be stable across runs.
pub const STABLE_FORMAT_DATE: &str = "%Y-%m-%d";
pub const STABLE_FORMAT_TIME: &str = "%H:%M:%S";

pub fn format_date(date: Date) -> String {
    date.strftime(STABLE_FORMAT_DATE).to_string()
}

pub fn parse_date(s: &str) -> Result<Date, jiff::Error> {
    Date::strptime(STABLE_FORMAT_DATE, s)
}

/// Zero-padded so that stored times compare correctly as strings.
pub fn format_time(time: Time) -> String {
    time.strftime(STABLE_FORMAT_TIME).to_string()
}

pub fn parse_time(s: &str) -> Result<Time, jiff::Error> {
    Time::strptime(STABLE_FORMAT_TIME, s)
}

/// Weekday as stored in the database, Monday = 0.
pub fn weekday_to_stored(weekday: Weekday) -> i64 {
    i64::from(weekday.to_monday_zero_offset())
}

pub fn weekday_from_stored(value: i64) -> Result<Weekday, jiff::Error> {
    // corrupted wide values must not wrap into the valid 0..=6 window
    let value = i8::try_from(value).unwrap_or(i8::MAX);
    Weekday::from_monday_zero_offset(value)
}
