//! Errors raised when rebuilding appointments from storage.

use crate::core::{AppointmentId, AppointmentState};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("Appointment {id} is {state} but has no assigned time")]
    MissingTime {
        id: AppointmentId,
        state: AppointmentState,
    },

    #[error("Appointment {0} has a zero-minute duration")]
    ZeroDuration(AppointmentId),
}
