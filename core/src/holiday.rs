// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::civil::Date;

/// Answers whether a date is a non-teaching day.
///
/// Read-only input to the scheduling core; the registry behind it is an
/// external collaborator.
pub trait HolidayOracle {
    fn is_holiday(&self, date: Date) -> bool;
}

/// A non-teaching day, either a fixed date or a yearly recurring one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Holiday {
    /// A single calendar date.
    Fixed { date: Date, name: String },

    /// The same month/day every year, e.g. a national day.
    Yearly { month: i8, day: i8, name: String },
}

impl Holiday {
    pub fn fixed(date: Date, name: impl Into<String>) -> Self {
        Holiday::Fixed {
            date,
            name: name.into(),
        }
    }

    pub fn yearly(month: i8, day: i8, name: impl Into<String>) -> Self {
        Holiday::Yearly {
            month,
            day,
            name: name.into(),
        }
    }
}

/// Holiday registry keyed by date, with yearly recurring entries.
#[derive(Debug, Default, Clone)]
pub struct HolidayCalendar {
    dates: HashSet<Date>,
    yearly: HashSet<(i8, i8)>,
}

impl HolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let mut calendar = Self::default();
        for holiday in holidays {
            calendar.add(holiday);
        }
        calendar
    }

    pub fn add(&mut self, holiday: Holiday) {
        match holiday {
            Holiday::Fixed { date, .. } => {
                self.dates.insert(date);
            }
            Holiday::Yearly { month, day, .. } => {
                self.yearly.insert((month, day));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.yearly.is_empty()
    }
}

impl HolidayOracle for HolidayCalendar {
    fn is_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date) || self.yearly.contains(&(date.month(), date.day()))
    }
}
