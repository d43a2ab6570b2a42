//! Appointment states.
//!
//! States are plain values. Everything here is a pure inspection; the legal
//! moves between states live in [`Transition`](super::Transition).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle position of an appointment.
///
/// `Rejected` and `Completed` are terminal: the only thing that can still
/// happen to such an appointment is administrative deletion, which removes
/// the record rather than moving it to another state.
///
/// # Example
///
/// ```rust
/// use appointment_core::core::AppointmentState;
///
/// assert_eq!(AppointmentState::Requested.name(), "REQUESTED");
/// assert!(!AppointmentState::Scheduled.is_final());
/// assert!(AppointmentState::Completed.is_final());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentState {
    /// Asked for by a patient; only a target date is known.
    Requested,
    /// Approved with a concrete date and time.
    Scheduled,
    /// Turned down by the doctor or an administrator.
    Rejected,
    /// Took place.
    Completed,
}

impl AppointmentState {
    pub const ALL: [AppointmentState; 4] = [
        AppointmentState::Requested,
        AppointmentState::Scheduled,
        AppointmentState::Rejected,
        AppointmentState::Completed,
    ];

    /// Stable upper-case name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Scheduled => "SCHEDULED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// States whose appointments block their time range once a time is assigned.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Requested | Self::Scheduled)
    }

    /// States that must carry a concrete date-time.
    pub fn requires_time(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Completed)
    }
}

impl fmt::Display for AppointmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
