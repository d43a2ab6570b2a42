//! Schedule errors.

use super::weekday::DayOfWeek;
use crate::core::{BlockId, DoctorId};
use chrono::NaiveTime;
use thiserror::Error;

/// Errors raised while building or editing a weekly schedule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Block on {day} must start before it ends ({start} is not before {end})")]
    InvalidTimeRange {
        day: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Schedule has {} invalid block(s)", .0.len())]
    InvalidBlocks(Vec<ScheduleError>),

    #[error("Availability block {0} not found")]
    BlockNotFound(BlockId),

    #[error("Doctor {requester} may not remove block {block} owned by doctor {owner}")]
    NotOwner {
        block: BlockId,
        owner: DoctorId,
        requester: DoctorId,
    },

    #[error("Unknown day of week '{0}'")]
    UnknownDay(String),
}
