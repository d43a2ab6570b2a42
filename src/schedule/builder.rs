//! Builder for weekly schedules.

use super::block::AvailabilityBlock;
use super::error::ScheduleError;
use super::weekday::DayOfWeek;
use super::WeeklySchedule;
use crate::core::DoctorId;
use chrono::NaiveTime;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Fluent builder for a doctor's [`WeeklySchedule`].
///
/// `build()` checks every block and reports all invalid ones together
/// instead of stopping at the first.
///
/// # Example
///
/// ```rust
/// use appointment_core::core::DoctorId;
/// use appointment_core::schedule::{DayOfWeek, WeeklySchedule};
/// use chrono::NaiveTime;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
///
/// let schedule = WeeklySchedule::builder(DoctorId::new())
///     .block(DayOfWeek::Monday, nine, five)
///     .block(DayOfWeek::Wednesday, nine, five)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.blocks().len(), 2);
/// ```
pub struct WeeklyScheduleBuilder {
    doctor_id: DoctorId,
    pending: Vec<(DayOfWeek, NaiveTime, NaiveTime)>,
}

impl WeeklyScheduleBuilder {
    pub fn new(doctor_id: DoctorId) -> Self {
        Self {
            doctor_id,
            pending: Vec::new(),
        }
    }

    /// Add a block recurring every `day` from `start` to `end`.
    pub fn block(mut self, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> Self {
        self.pending.push((day, start, end));
        self
    }

    /// Add the same time range on several days.
    pub fn days<I>(mut self, days: I, start: NaiveTime, end: NaiveTime) -> Self
    where
        I: IntoIterator<Item = DayOfWeek>,
    {
        self.pending
            .extend(days.into_iter().map(|day| (day, start, end)));
        self
    }

    pub fn build(self) -> Result<WeeklySchedule, ScheduleError> {
        let mut blocks = Vec::with_capacity(self.pending.len());
        let mut checks: Vec<Validation<(), NonEmptyVec<ScheduleError>>> =
            Vec::with_capacity(self.pending.len());

        for (day, start, end) in self.pending {
            let check = match AvailabilityBlock::new(day, start, end) {
                Ok(block) => {
                    blocks.push(block);
                    Validation::success(())
                }
                Err(err) => Validation::fail(err),
            };
            checks.push(check);
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(_) => Ok(WeeklySchedule::from_blocks(self.doctor_id, blocks)),
            Validation::Failure(errors) => Err(ScheduleError::InvalidBlocks(
                errors.iter().cloned().collect(),
            )),
        }
    }
}
