//! Inputs and outputs of lifecycle operations that are not appointments.

use crate::core::{AppointmentId, AppointmentState, DoctorId, PatientId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient's request for an appointment on a given day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub id: AppointmentId,
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub date: NaiveDate,
    pub reason: String,
}

impl AppointmentRequest {
    /// New request with a freshly minted appointment id.
    pub fn new(
        doctor_id: DoctorId,
        patient_id: PatientId,
        date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            doctor_id,
            patient_id,
            date,
            reason: reason.into(),
        }
    }

    /// Use an id reserved by storage instead of a random one.
    pub fn with_id(mut self, id: AppointmentId) -> Self {
        self.id = id;
        self
    }
}

/// Permission to destroy an appointment record.
///
/// Deletion is not a state; the caller removes the record from storage
/// after receiving this decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
    pub appointment_id: AppointmentId,
    /// State the appointment was in when deletion was granted
    pub last_state: AppointmentState,
}
