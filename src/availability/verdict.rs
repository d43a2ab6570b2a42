//! Outcome of an availability check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate slot was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// No availability block of the doctor holds the whole slot.
    OutsideWorkingHours,
    /// The slot intersects an appointment already booked with the doctor.
    SlotConflict,
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutsideWorkingHours => "OUTSIDE_WORKING_HOURS",
            Self::SlotConflict => "SLOT_CONFLICT",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideWorkingHours => {
                f.write_str("requested time is outside the doctor's working hours")
            }
            Self::SlotConflict => f.write_str("an appointment is already booked at that time"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accept => None,
            Self::Reject(reason) => Some(*reason),
        }
    }

    pub fn into_result(self) -> Result<(), RejectReason> {
        match self {
            Self::Accept => Ok(()),
            Self::Reject(reason) => Err(reason),
        }
    }
}
