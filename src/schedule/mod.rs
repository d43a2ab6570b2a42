//! A doctor's recurring weekly availability.
//!
//! The schedule is pure data: a set of [`AvailabilityBlock`]s owned by one
//! doctor. Blocks may overlap; the union of all blocks is the doctor's
//! available time. An appointment must fit entirely inside a single block.
//! Two adjacent blocks are never stitched together to host one appointment.

mod block;
mod builder;
mod error;
mod weekday;

pub use block::AvailabilityBlock;
pub use builder::WeeklyScheduleBuilder;
pub use error::ScheduleError;
pub use weekday::DayOfWeek;

use crate::core::{BlockId, DoctorId};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All availability blocks of one doctor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    doctor_id: DoctorId,
    blocks: Vec<AvailabilityBlock>,
}

impl WeeklySchedule {
    /// An empty schedule: the doctor is never available.
    pub fn new(doctor_id: DoctorId) -> Self {
        Self {
            doctor_id,
            blocks: Vec::new(),
        }
    }

    pub fn builder(doctor_id: DoctorId) -> WeeklyScheduleBuilder {
        WeeklyScheduleBuilder::new(doctor_id)
    }

    /// Assemble a schedule from blocks loaded from storage.
    pub fn from_blocks(doctor_id: DoctorId, blocks: Vec<AvailabilityBlock>) -> Self {
        Self { doctor_id, blocks }
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn blocks(&self) -> &[AvailabilityBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks_on(&self, day: DayOfWeek) -> impl Iterator<Item = &AvailabilityBlock> + '_ {
        self.blocks.iter().filter(move |b| b.day() == day)
    }

    /// Add a block and return its id.
    pub fn add_block(&mut self, block: AvailabilityBlock) -> BlockId {
        let id = block.id();
        debug!(doctor_id = %self.doctor_id, block_id = %id, day = %block.day(), "adding availability block");
        self.blocks.push(block);
        id
    }

    /// Remove a block on behalf of `requester`.
    ///
    /// Only the owning doctor may remove a block.
    pub fn remove_block(
        &mut self,
        block_id: BlockId,
        requester: DoctorId,
    ) -> Result<AvailabilityBlock, ScheduleError> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.id() == block_id)
            .ok_or(ScheduleError::BlockNotFound(block_id))?;

        if requester != self.doctor_id {
            return Err(ScheduleError::NotOwner {
                block: block_id,
                owner: self.doctor_id,
                requester,
            });
        }

        debug!(doctor_id = %self.doctor_id, block_id = %block_id, "removing availability block");
        Ok(self.blocks.remove(index))
    }

    /// True iff some block on `day` contains the whole range
    /// `[time, time + duration_minutes)`.
    ///
    /// ```rust
    /// use appointment_core::core::DoctorId;
    /// use appointment_core::schedule::{DayOfWeek, WeeklySchedule};
    /// use chrono::NaiveTime;
    ///
    /// let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    /// let schedule = WeeklySchedule::builder(DoctorId::new())
    ///     .block(DayOfWeek::Monday, hm(9, 0), hm(17, 0))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(schedule.is_within_availability(DayOfWeek::Monday, hm(16, 30), 30));
    /// assert!(!schedule.is_within_availability(DayOfWeek::Monday, hm(16, 45), 30));
    /// assert!(!schedule.is_within_availability(DayOfWeek::Tuesday, hm(10, 0), 30));
    /// ```
    pub fn is_within_availability(
        &self,
        day: DayOfWeek,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> bool {
        let duration = Duration::minutes(i64::from(duration_minutes));
        self.blocks_on(day).any(|b| b.fits(day, time, duration))
    }
}
