// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;

use crate::course::ScheduleDay;
use crate::holiday::HolidayOracle;

/// A candidate session date produced by recurrence expansion.
///
/// `day` indexes into the schedule days the expansion was built from, so the
/// generator can copy the matching time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub date: Date,
    pub day: usize,
}

/// Expands a course's recurring schedule into candidate session dates.
///
/// Iterates every calendar date from `start` to `end` inclusive and emits one
/// candidate per schedule day matching that date's weekday. A date the oracle
/// reports as a holiday is dropped entirely. The result is lazy and
/// restartable (clone it to walk twice); ordering is strictly ascending by
/// date, then by declaration order of the schedule days. Pure function of its
/// inputs.
pub fn expand<'a, O>(
    start: Date,
    end: Date,
    days: &'a [ScheduleDay],
    oracle: &'a O,
) -> Expansion<'a, O>
where
    O: HolidayOracle + ?Sized,
{
    Expansion {
        days,
        oracle,
        end,
        cursor: Some(start),
        next_day: 0,
    }
}

/// Lazy iterator over candidate session dates, see [`expand`].
pub struct Expansion<'a, O: ?Sized> {
    days: &'a [ScheduleDay],
    oracle: &'a O,
    end: Date,
    cursor: Option<Date>,
    next_day: usize,
}

// manual impl: the oracle is only borrowed, so `O: Clone` is not required
impl<O: ?Sized> Clone for Expansion<'_, O> {
    fn clone(&self) -> Self {
        Self {
            days: self.days,
            oracle: self.oracle,
            end: self.end,
            cursor: self.cursor,
            next_day: self.next_day,
        }
    }
}

impl<O> Iterator for Expansion<'_, O>
where
    O: HolidayOracle + ?Sized,
{
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let date = self.cursor?;
            if date > self.end {
                self.cursor = None;
                return None;
            }

            if self.next_day == 0 && self.oracle.is_holiday(date) {
                self.advance(date);
                continue;
            }

            while self.next_day < self.days.len() {
                let day = self.next_day;
                self.next_day += 1;
                if self.days[day].weekday == date.weekday() {
                    return Some(Candidate { date, day });
                }
            }

            self.advance(date);
        }
    }
}

impl<O: ?Sized> Expansion<'_, O> {
    fn advance(&mut self, date: Date) {
        self.next_day = 0;
        // tomorrow() only fails at the end of the supported calendar range
        self.cursor = date.tomorrow().ok();
    }
}
