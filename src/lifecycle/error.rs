//! Lifecycle errors.

use crate::availability::RejectReason;
use crate::core::{AppointmentState, Transition};
use crate::intake::IntakeViolation;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Why a transition was refused. A refused transition changes nothing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    /// The transition is not in the table for the current state.
    #[error("Cannot {attempted} an appointment that is {current}")]
    InvalidTransition {
        current: AppointmentState,
        attempted: Transition,
    },

    /// The actor lacks the capability; checked before anything else.
    #[error("Not allowed to {attempted} this appointment")]
    Forbidden { attempted: Transition },

    #[error("Requested time {requested} is outside the doctor's working hours")]
    OutsideWorkingHours { requested: NaiveDateTime },

    #[error("Requested time {requested} collides with an existing appointment")]
    SlotConflict { requested: NaiveDateTime },

    #[error("Invalid input: {}", join(.violations))]
    InvalidRequest { violations: Vec<IntakeViolation> },
}

impl LifecycleError {
    pub fn unavailable(reason: RejectReason, requested: NaiveDateTime) -> Self {
        match reason {
            RejectReason::OutsideWorkingHours => Self::OutsideWorkingHours { requested },
            RejectReason::SlotConflict => Self::SlotConflict { requested },
        }
    }

    /// The availability reason behind this error, if it is a scheduling rejection.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::OutsideWorkingHours { .. } => Some(RejectReason::OutsideWorkingHours),
            Self::SlotConflict { .. } => Some(RejectReason::SlotConflict),
            _ => None,
        }
    }

    /// Errors the end user can fix by choosing different input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::OutsideWorkingHours { .. } | Self::SlotConflict { .. } | Self::InvalidRequest { .. }
        )
    }
}

fn join(violations: &[IntakeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
