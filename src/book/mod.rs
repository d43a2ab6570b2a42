//! Existing appointments and overlap queries.
//!
//! The book is the set of appointments the orchestration layer loaded for a
//! decision. It answers "does this range collide with anything already
//! booked?" and the listing queries the service layer needs. It may hold
//! appointments of several doctors; every query is keyed by doctor or
//! patient.

mod appointment;
mod error;
mod slot;

pub use appointment::{Appointment, AppointmentRecord, SlotTime};
pub use error::BookError;
pub use slot::{ranges_overlap, Slot};

use crate::core::{AppointmentId, AppointmentState, DoctorId, PatientId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
        }
    }

    pub fn from_appointments(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> + '_ {
        self.appointments.iter()
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id() == id)
    }

    /// Insert an appointment, replacing any previous version with the same id.
    pub fn upsert(&mut self, appointment: Appointment) {
        match self.appointments.iter_mut().find(|a| a.id() == appointment.id()) {
            Some(existing) => *existing = appointment,
            None => self.appointments.push(appointment),
        }
    }

    pub fn remove(&mut self, id: AppointmentId) -> Option<Appointment> {
        let index = self.appointments.iter().position(|a| a.id() == id)?;
        Some(self.appointments.remove(index))
    }

    /// Active appointments of `doctor_id` whose slot intersects
    /// `[start, end)`, skipping `exclude`.
    pub fn conflicts(
        &self,
        doctor_id: DoctorId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<AppointmentId>,
    ) -> impl Iterator<Item = &Appointment> + '_ {
        self.appointments.iter().filter(move |a| {
            a.doctor_id() == doctor_id
                && Some(a.id()) != exclude
                && a.occupied_range()
                    .is_some_and(|(s, e)| ranges_overlap(s, e, start, end))
        })
    }

    /// True iff an active, timed appointment of `doctor_id` other than
    /// `exclude` intersects `[start, end)`.
    ///
    /// Requests still waiting for a time never conflict.
    pub fn has_conflict(
        &self,
        doctor_id: DoctorId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<AppointmentId>,
    ) -> bool {
        let conflict = self
            .conflicts(doctor_id, start, end, exclude)
            .next()
            .is_some();
        if conflict {
            debug!(doctor_id = %doctor_id, %start, %end, "slot collides with existing appointment");
        }
        conflict
    }

    /// Requests of `doctor_id` still waiting for approval.
    pub fn requested_for(&self, doctor_id: DoctorId) -> Vec<&Appointment> {
        self.by_doctor_in(doctor_id, AppointmentState::Requested)
    }

    pub fn completed_for(&self, doctor_id: DoctorId) -> Vec<&Appointment> {
        self.by_doctor_in(doctor_id, AppointmentState::Completed)
    }

    /// Completed appointments across all doctors.
    pub fn completed(&self) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.state() == AppointmentState::Completed)
            .collect()
    }

    pub fn for_patient(&self, patient_id: PatientId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id() == patient_id)
            .collect()
    }

    fn by_doctor_in(&self, doctor_id: DoctorId, state: AppointmentState) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id() == doctor_id && a.state() == state)
            .collect()
    }
}

impl FromIterator<Appointment> for AppointmentBook {
    fn from_iter<I: IntoIterator<Item = Appointment>>(iter: I) -> Self {
        Self::from_appointments(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionHistory;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 4).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn appointment(
        doctor_id: DoctorId,
        patient_id: PatientId,
        state: AppointmentState,
        time: SlotTime,
    ) -> Appointment {
        Appointment::try_from(AppointmentRecord {
            id: AppointmentId::new(),
            doctor_id,
            patient_id,
            time,
            state,
            reason: String::new(),
            duration_minutes: 30,
            history: TransitionHistory::new(),
        })
        .unwrap()
    }

    fn scheduled(doctor_id: DoctorId, hour: u32, minute: u32) -> Appointment {
        appointment(
            doctor_id,
            PatientId::new(),
            AppointmentState::Scheduled,
            SlotTime::Fixed(at(hour, minute)),
        )
    }

    #[test]
    fn overlapping_scheduled_appointment_conflicts() {
        let doctor = DoctorId::new();
        let book: AppointmentBook = [scheduled(doctor, 10, 30)].into_iter().collect();

        assert!(book.has_conflict(doctor, at(10, 45), at(11, 15), None));
        assert!(book.has_conflict(doctor, at(10, 0), at(12, 0), None));
    }

    #[test]
    fn back_to_back_does_not_conflict() {
        let doctor = DoctorId::new();
        let book: AppointmentBook = [scheduled(doctor, 10, 30)].into_iter().collect();

        assert!(!book.has_conflict(doctor, at(11, 0), at(11, 30), None));
        assert!(!book.has_conflict(doctor, at(10, 0), at(10, 30), None));
    }

    #[test]
    fn other_doctors_do_not_conflict() {
        let doctor = DoctorId::new();
        let book: AppointmentBook = [scheduled(DoctorId::new(), 10, 30)].into_iter().collect();

        assert!(!book.has_conflict(doctor, at(10, 30), at(11, 0), None));
    }

    #[test]
    fn excluded_appointment_does_not_conflict_with_itself() {
        let doctor = DoctorId::new();
        let existing = scheduled(doctor, 10, 30);
        let id = existing.id();
        let book: AppointmentBook = [existing].into_iter().collect();

        assert!(!book.has_conflict(doctor, at(10, 30), at(11, 0), Some(id)));
        assert!(book.has_conflict(doctor, at(10, 30), at(11, 0), None));
    }

    #[test]
    fn untimed_requests_and_finished_appointments_never_conflict() {
        let doctor = DoctorId::new();
        let patient = PatientId::new();
        let book: AppointmentBook = [
            appointment(doctor, patient, AppointmentState::Requested, SlotTime::DateOnly(day())),
            appointment(doctor, patient, AppointmentState::Rejected, SlotTime::Fixed(at(10, 30))),
            appointment(doctor, patient, AppointmentState::Completed, SlotTime::Fixed(at(10, 30))),
        ]
        .into_iter()
        .collect();

        assert!(!book.has_conflict(doctor, at(0, 0), at(23, 59), None));
    }

    #[test]
    fn timed_request_conflicts() {
        let doctor = DoctorId::new();
        let book: AppointmentBook = [appointment(
            doctor,
            PatientId::new(),
            AppointmentState::Requested,
            SlotTime::Fixed(at(9, 0)),
        )]
        .into_iter()
        .collect();

        assert!(book.has_conflict(doctor, at(9, 15), at(9, 45), None));
    }

    #[test]
    fn conflicts_lists_every_colliding_appointment() {
        let doctor = DoctorId::new();
        let book: AppointmentBook = [
            scheduled(doctor, 9, 0),
            scheduled(doctor, 9, 30),
            scheduled(doctor, 11, 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(book.conflicts(doctor, at(9, 15), at(10, 15), None).count(), 2);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let doctor = DoctorId::new();
        let first = scheduled(doctor, 9, 0);
        let id = first.id();
        let mut book = AppointmentBook::new();
        book.upsert(first);

        let replacement = Appointment::try_from(AppointmentRecord {
            time: SlotTime::Fixed(at(15, 0)),
            ..AppointmentRecord::from(book.get(id).unwrap().clone())
        })
        .unwrap();
        book.upsert(replacement);

        assert_eq!(book.len(), 1);
        assert_eq!(book.get(id).unwrap().start(), Some(at(15, 0)));
        assert!(book.remove(id).is_some());
        assert!(book.is_empty());
    }

    #[test]
    fn listing_queries_filter_by_state_and_party() {
        let doctor = DoctorId::new();
        let other_doctor = DoctorId::new();
        let patient = PatientId::new();
        let book: AppointmentBook = [
            appointment(doctor, patient, AppointmentState::Requested, SlotTime::DateOnly(day())),
            appointment(doctor, PatientId::new(), AppointmentState::Completed, SlotTime::Fixed(at(9, 0))),
            appointment(other_doctor, patient, AppointmentState::Completed, SlotTime::Fixed(at(9, 0))),
            scheduled(doctor, 14, 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(book.requested_for(doctor).len(), 1);
        assert!(book.requested_for(other_doctor).is_empty());
        assert_eq!(book.completed_for(doctor).len(), 1);
        assert_eq!(book.completed().len(), 2);
        assert_eq!(book.for_patient(patient).len(), 2);
    }
}
