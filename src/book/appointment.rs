//! The appointment aggregate.

use super::error::BookError;
use crate::core::{
    AppointmentId, AppointmentState, DoctorId, PatientId, TransitionHistory, TransitionRecord,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// When an appointment takes place, as far as it is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTime {
    /// Only the day is known; the doctor has not assigned a time yet.
    DateOnly(NaiveDate),
    /// A concrete start.
    Fixed(NaiveDateTime),
}

impl SlotTime {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateOnly(date) => *date,
            Self::Fixed(at) => at.date(),
        }
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateOnly(_) => None,
            Self::Fixed(at) => Some(*at),
        }
    }

    /// Start of day for date-only values, the concrete start otherwise.
    pub fn as_datetime(&self) -> NaiveDateTime {
        match self {
            Self::DateOnly(date) => date.and_time(NaiveTime::MIN),
            Self::Fixed(at) => *at,
        }
    }
}

/// A booking between one patient and one doctor.
///
/// Invariant: the time is [`SlotTime::Fixed`] whenever the state is
/// `SCHEDULED` or `COMPLETED`. Appointments are only created and moved by the
/// [`AppointmentStateMachine`](crate::lifecycle::AppointmentStateMachine);
/// storage layers rebuild them through [`AppointmentRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppointmentRecord", into = "AppointmentRecord")]
pub struct Appointment {
    id: AppointmentId,
    doctor_id: DoctorId,
    patient_id: PatientId,
    time: SlotTime,
    state: AppointmentState,
    reason: String,
    duration_minutes: u32,
    history: TransitionHistory,
}

/// Flat, unchecked form of an [`Appointment`] for persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: AppointmentId,
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub time: SlotTime,
    pub state: AppointmentState,
    pub reason: String,
    pub duration_minutes: u32,
    pub history: TransitionHistory,
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = BookError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        if record.state.requires_time() && record.time.start().is_none() {
            return Err(BookError::MissingTime {
                id: record.id,
                state: record.state,
            });
        }
        if record.duration_minutes == 0 {
            return Err(BookError::ZeroDuration(record.id));
        }
        Ok(Self {
            id: record.id,
            doctor_id: record.doctor_id,
            patient_id: record.patient_id,
            time: record.time,
            state: record.state,
            reason: record.reason,
            duration_minutes: record.duration_minutes,
            history: record.history,
        })
    }
}

impl From<Appointment> for AppointmentRecord {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            patient_id: appointment.patient_id,
            time: appointment.time,
            state: appointment.state,
            reason: appointment.reason,
            duration_minutes: appointment.duration_minutes,
            history: appointment.history,
        }
    }
}

impl Appointment {
    /// A fresh request for `date`, with its first history record.
    pub(crate) fn requested(
        id: AppointmentId,
        doctor_id: DoctorId,
        patient_id: PatientId,
        date: NaiveDate,
        reason: String,
        duration_minutes: u32,
        record: TransitionRecord,
    ) -> Self {
        Self {
            id,
            doctor_id,
            patient_id,
            time: SlotTime::DateOnly(date),
            state: AppointmentState::Requested,
            reason,
            duration_minutes,
            history: TransitionHistory::new().record(record),
        }
    }

    /// Copy of this appointment after a committed transition.
    pub(crate) fn advanced(&self, time: SlotTime, duration_minutes: u32, record: TransitionRecord) -> Self {
        Self {
            time,
            state: record.to,
            duration_minutes,
            history: self.history.record(record),
            reason: self.reason.clone(),
            ..*self
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn state(&self) -> AppointmentState {
        self.state
    }

    pub fn time(&self) -> SlotTime {
        self.time
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    /// Concrete start, once a time has been assigned.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.time.start()
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.start()
            .and_then(|start| start.checked_add_signed(self.duration()))
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    /// Half-open range this appointment blocks in its doctor's calendar.
    ///
    /// Only active appointments with an assigned time occupy a slot.
    pub fn occupied_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if !self.state.is_active() {
            return None;
        }
        Some((self.start()?, self.end()?))
    }
}
