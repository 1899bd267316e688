// SPDX-FileCopyrightText: 2026 Lectern contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Course-to-sessions scheduling engine.
//!
//! Given a course's recurring weekly schedule, this crate materializes the
//! concrete list of class sessions, skipping holidays, rejecting room and
//! teacher double-bookings, and persisting the course and its sessions under
//! a two-phase transactional contract.

mod availability;
mod config;
mod course;
mod datetime;
mod error;
mod generator;
mod holiday;
mod localdb;
mod recurrence;
mod scheduler;
mod session;

pub use crate::availability::AvailabilityIndex;
pub use crate::config::{Config, ConfigTimeout, DEFAULT_SESSION_SAVE_TIMEOUT};
pub use crate::course::{Course, CourseId, CourseStatus, RoomId, ScheduleDay, TeacherId};
pub use crate::error::{InvalidSchedule, SavePhase, ScheduleError};
pub use crate::generator::generate;
pub use crate::holiday::{Holiday, HolidayCalendar, HolidayOracle};
pub use crate::recurrence::{Candidate, Expansion, expand};
pub use crate::scheduler::{CreationOutcome, Scheduler};
pub use crate::session::{ClassSession, SessionId, SessionRef, SessionStatus};
