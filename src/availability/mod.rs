//! Availability validation.
//!
//! Decides whether a fixed-duration appointment may start at a given
//! date-time, from a doctor's [`WeeklySchedule`] and the current
//! [`AppointmentBook`]. The check is a pure function of its inputs: callers
//! load both collections first and must evaluate the verdict atomically with
//! the write that commits it (per-doctor lock or a transaction that re-runs
//! the conflict query), otherwise two concurrent approvals can both pass.

mod verdict;

pub use verdict::{RejectReason, Verdict};

use crate::book::{AppointmentBook, Slot};
use crate::core::{AppointmentId, DoctorId};
use crate::schedule::{DayOfWeek, WeeklySchedule};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Borrowing validator over one doctor's schedule and the loaded book.
#[derive(Clone, Copy, Debug)]
pub struct AvailabilityValidator<'a> {
    schedule: &'a WeeklySchedule,
    book: &'a AppointmentBook,
}

impl<'a> AvailabilityValidator<'a> {
    pub fn new(schedule: &'a WeeklySchedule, book: &'a AppointmentBook) -> Self {
        Self { schedule, book }
    }

    pub fn schedule(&self) -> &'a WeeklySchedule {
        self.schedule
    }

    pub fn book(&self) -> &'a AppointmentBook {
        self.book
    }

    /// Check working hours first, then collisions.
    ///
    /// `exclude` names the appointment being moved so its current slot does
    /// not count against it.
    ///
    /// ```rust
    /// use appointment_core::availability::{AvailabilityValidator, RejectReason, Verdict};
    /// use appointment_core::book::AppointmentBook;
    /// use appointment_core::core::DoctorId;
    /// use appointment_core::schedule::{DayOfWeek, WeeklySchedule};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let doctor = DoctorId::new();
    /// let schedule = WeeklySchedule::builder(doctor)
    ///     .block(
    ///         DayOfWeek::Monday,
    ///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///         NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    ///     )
    ///     .build()
    ///     .unwrap();
    /// let book = AppointmentBook::new();
    /// let validator = AvailabilityValidator::new(&schedule, &book);
    ///
    /// // 2030-03-04 is a Monday
    /// let monday = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();
    /// let ok = monday.and_hms_opt(10, 30, 0).unwrap();
    /// let late = monday.and_hms_opt(16, 45, 0).unwrap();
    ///
    /// assert_eq!(validator.validate(doctor, ok, 30, None), Verdict::Accept);
    /// assert_eq!(
    ///     validator.validate(doctor, late, 30, None),
    ///     Verdict::Reject(RejectReason::OutsideWorkingHours)
    /// );
    /// ```
    pub fn validate(
        &self,
        doctor_id: DoctorId,
        candidate: NaiveDateTime,
        duration_minutes: u32,
        exclude: Option<AppointmentId>,
    ) -> Verdict {
        let Some(slot) = Slot::new(doctor_id, candidate, duration_minutes) else {
            debug!(doctor_id = %doctor_id, %candidate, "candidate ends past the last instant");
            return Verdict::Reject(RejectReason::OutsideWorkingHours);
        };
        debug!(
            doctor_id = %doctor_id,
            start = %slot.start,
            end = %slot.end,
            "validating candidate slot"
        );

        if self.schedule.doctor_id() != doctor_id {
            warn!(
                doctor_id = %doctor_id,
                schedule_owner = %self.schedule.doctor_id(),
                "schedule belongs to another doctor"
            );
            return Verdict::Reject(RejectReason::OutsideWorkingHours);
        }

        let day = DayOfWeek::of(candidate.date());
        if !self
            .schedule
            .is_within_availability(day, candidate.time(), duration_minutes)
        {
            debug!(doctor_id = %doctor_id, %day, "candidate outside working hours");
            return Verdict::Reject(RejectReason::OutsideWorkingHours);
        }

        if self
            .book
            .has_conflict(doctor_id, slot.start, slot.end, exclude)
        {
            return Verdict::Reject(RejectReason::SlotConflict);
        }

        Verdict::Accept
    }
}
