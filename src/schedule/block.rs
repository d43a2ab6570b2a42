//! A single recurring availability block.

use super::error::ScheduleError;
use super::weekday::DayOfWeek;
use crate::core::BlockId;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Recurring weekly time range during which a doctor accepts appointments.
///
/// Always satisfies `start < end`; construction and deserialization both
/// reject anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockFields")]
pub struct AvailabilityBlock {
    id: BlockId,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Deserialize)]
struct BlockFields {
    id: BlockId,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<BlockFields> for AvailabilityBlock {
    type Error = ScheduleError;

    fn try_from(fields: BlockFields) -> Result<Self, Self::Error> {
        Self::with_id(fields.id, fields.day, fields.start, fields.end)
    }
}

impl AvailabilityBlock {
    /// Create a block with a freshly minted id.
    pub fn new(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> Result<Self, ScheduleError> {
        Self::with_id(BlockId::new(), day, start, end)
    }

    /// Rebuild a block that already has an id in storage.
    pub fn with_id(
        id: BlockId,
        day: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange { day, start, end });
        }
        Ok(Self {
            id,
            day,
            start,
            end,
        })
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn day(&self) -> DayOfWeek {
        self.day
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether an appointment starting at `time` on `day` and lasting
    /// `duration` lies entirely inside this block.
    ///
    /// An appointment that would run past midnight never fits.
    pub fn fits(&self, day: DayOfWeek, time: NaiveTime, duration: Duration) -> bool {
        if day != self.day || time < self.start {
            return false;
        }
        let (end, wrapped) = time.overflowing_add_signed(duration);
        wrapped == 0 && end <= self.end
    }
}
