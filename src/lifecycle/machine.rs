//! The appointment state machine.

use super::capability::CanActOnAppointment;
use super::error::LifecycleError;
use super::request::{AppointmentRequest, Deletion};
use crate::availability::AvailabilityValidator;
use crate::book::{Appointment, SlotTime};
use crate::config::{ConfigError, SchedulingConfig};
use crate::core::{AppointmentState, Transition, TransitionRecord};
use crate::intake::{into_result, IntakeCheck, IntakeRules};
use chrono::{NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

/// Guards every transition of a single appointment.
///
/// Stateless apart from its configuration and the caller-supplied "now",
/// so it is cheap to build per request. Each operation takes the current
/// appointment by reference and returns the next version; on error nothing
/// has changed.
///
/// Checks run in a fixed order: actor capability, then the transition
/// table, then input rules, then availability.
#[derive(Clone, Debug)]
pub struct AppointmentStateMachine {
    config: SchedulingConfig,
    rules: IntakeRules,
    now: NaiveDateTime,
}

impl AppointmentStateMachine {
    pub fn new(config: SchedulingConfig, now: NaiveDateTime) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = IntakeRules::from_config(&config);
        Ok(Self { config, rules, now })
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// File a new request. The appointment starts in `REQUESTED` with only
    /// its date known.
    pub fn request(&self, request: AppointmentRequest) -> Result<Appointment, LifecycleError> {
        debug!(
            appointment_id = %request.id,
            doctor_id = %request.doctor_id,
            date = %request.date,
            "requesting appointment"
        );
        self.check_input(
            Transition::Request,
            self.rules
                .check_request(request.date, &request.reason, self.now),
        )?;

        let appointment = Appointment::requested(
            request.id,
            request.doctor_id,
            request.patient_id,
            request.date,
            request.reason,
            self.config.slot_duration_minutes,
            TransitionRecord {
                from: None,
                to: AppointmentState::Requested,
                transition: Transition::Request,
                at: self.now,
                slot: None,
            },
        );
        info!(appointment_id = %appointment.id(), "appointment requested");
        Ok(appointment)
    }

    /// Fix the time of a requested appointment on its requested date.
    pub fn approve<A>(
        &self,
        appointment: &Appointment,
        time: NaiveTime,
        actor: &A,
        validator: &AvailabilityValidator<'_>,
    ) -> Result<Appointment, LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        self.admit(appointment, Transition::Approve, actor)?;
        let start = appointment.date().and_time(time);
        self.check_slot(appointment, start, validator)?;
        Ok(self.commit(appointment, Transition::Approve, SlotTime::Fixed(start)))
    }

    pub fn reject<A>(&self, appointment: &Appointment, actor: &A) -> Result<Appointment, LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        self.admit(appointment, Transition::Reject, actor)?;
        Ok(self.commit(appointment, Transition::Reject, appointment.time()))
    }

    /// Move a scheduled appointment to `new_start`. Its own current slot is
    /// ignored during conflict detection.
    pub fn postpone<A>(
        &self,
        appointment: &Appointment,
        new_start: NaiveDateTime,
        actor: &A,
        validator: &AvailabilityValidator<'_>,
    ) -> Result<Appointment, LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        self.admit(appointment, Transition::Postpone, actor)?;
        self.check_input(
            Transition::Postpone,
            self.rules.check_postpone(new_start, self.now),
        )?;
        self.check_slot(appointment, new_start, validator)?;
        Ok(self.commit(appointment, Transition::Postpone, SlotTime::Fixed(new_start)))
    }

    pub fn complete<A>(&self, appointment: &Appointment, actor: &A) -> Result<Appointment, LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        self.admit(appointment, Transition::Complete, actor)?;
        Ok(self.commit(appointment, Transition::Complete, appointment.time()))
    }

    /// Grant removal of the record. Admins only, from any state.
    pub fn authorize_delete<A>(&self, appointment: &Appointment, actor: &A) -> Result<Deletion, LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        self.admit(appointment, Transition::Delete, actor)?;
        info!(appointment_id = %appointment.id(), state = %appointment.state(), "appointment deletion granted");
        Ok(Deletion {
            appointment_id: appointment.id(),
            last_state: appointment.state(),
        })
    }

    fn admit<A>(
        &self,
        appointment: &Appointment,
        transition: Transition,
        actor: &A,
    ) -> Result<(), LifecycleError>
    where
        A: CanActOnAppointment + ?Sized,
    {
        if !actor.capability_for(appointment).permits(transition) {
            warn!(appointment_id = %appointment.id(), %transition, "actor lacks capability");
            return Err(LifecycleError::Forbidden {
                attempted: transition,
            });
        }

        let current = appointment.state();
        if !transition.permits_from(Some(current)) {
            warn!(appointment_id = %appointment.id(), %current, %transition, "transition not allowed");
            return Err(LifecycleError::InvalidTransition {
                current,
                attempted: transition,
            });
        }

        Ok(())
    }

    fn check_input(&self, transition: Transition, check: IntakeCheck) -> Result<(), LifecycleError> {
        into_result(check).map_err(|violations| {
            warn!(%transition, count = violations.len(), "input rejected");
            LifecycleError::InvalidRequest { violations }
        })
    }

    fn check_slot(
        &self,
        appointment: &Appointment,
        start: NaiveDateTime,
        validator: &AvailabilityValidator<'_>,
    ) -> Result<(), LifecycleError> {
        validator
            .validate(
                appointment.doctor_id(),
                start,
                self.config.slot_duration_minutes,
                Some(appointment.id()),
            )
            .into_result()
            .map_err(|reason| {
                warn!(
                    appointment_id = %appointment.id(),
                    %start,
                    reason = reason.code(),
                    "slot rejected"
                );
                LifecycleError::unavailable(reason, start)
            })
    }

    fn commit(&self, appointment: &Appointment, transition: Transition, time: SlotTime) -> Appointment {
        let from = appointment.state();
        let record = TransitionRecord {
            from: Some(from),
            to: transition.target().unwrap_or(from),
            transition,
            at: self.now,
            slot: if transition.assigns_time() {
                time.start()
            } else {
                None
            },
        };
        let next = appointment.advanced(time, self.config.slot_duration_minutes, record);
        info!(
            appointment_id = %next.id(),
            %from,
            to = %next.state(),
            %transition,
            "appointment transition committed"
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::AppointmentBook;
    use crate::core::{DoctorId, PatientId};
    use crate::intake::IntakeViolation;
    use crate::lifecycle::Capability;
    use crate::schedule::{DayOfWeek, WeeklySchedule};
    use chrono::{Duration, NaiveDate};

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    // 2030-03-04 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 4).unwrap()
    }

    fn now() -> NaiveDateTime {
        monday().pred_opt().unwrap().and_time(hm(8, 0))
    }

    fn machine() -> AppointmentStateMachine {
        AppointmentStateMachine::new(SchedulingConfig::default(), now()).unwrap()
    }

    struct Practice {
        doctor: DoctorId,
        schedule: WeeklySchedule,
        book: AppointmentBook,
    }

    impl Practice {
        fn new() -> Self {
            let doctor = DoctorId::new();
            let schedule = WeeklySchedule::builder(doctor)
                .block(DayOfWeek::Monday, hm(9, 0), hm(17, 0))
                .build()
                .unwrap();
            Self {
                doctor,
                schedule,
                book: AppointmentBook::new(),
            }
        }

        fn validator(&self) -> AvailabilityValidator<'_> {
            AvailabilityValidator::new(&self.schedule, &self.book)
        }

        fn requested(&mut self) -> Appointment {
            let appointment = machine()
                .request(AppointmentRequest::new(
                    self.doctor,
                    PatientId::new(),
                    monday(),
                    "follow-up",
                ))
                .unwrap();
            self.book.upsert(appointment.clone());
            appointment
        }

        fn scheduled_at(&mut self, time: NaiveTime) -> Appointment {
            let requested = self.requested();
            let scheduled = machine()
                .approve(&requested, time, &Capability::doctor_of_record(), &self.validator())
                .unwrap();
            self.book.upsert(scheduled.clone());
            scheduled
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = SchedulingConfig::default().with_slot_duration(0);
        assert!(AppointmentStateMachine::new(config, now()).is_err());
    }

    #[test]
    fn request_starts_at_start_of_day_without_time() {
        let mut practice = Practice::new();
        let appointment = practice.requested();

        assert_eq!(appointment.state(), AppointmentState::Requested);
        assert_eq!(appointment.start(), None);
        assert_eq!(appointment.time().as_datetime(), monday().and_time(NaiveTime::MIN));
        assert_eq!(appointment.duration_minutes(), 30);
        assert_eq!(appointment.history().path(), vec![AppointmentState::Requested]);
    }

    #[test]
    fn request_in_the_past_is_invalid() {
        let practice = Practice::new();
        let result = machine().request(AppointmentRequest::new(
            practice.doctor,
            PatientId::new(),
            now().date() - Duration::days(1),
            "late",
        ));

        assert!(matches!(
            result,
            Err(LifecycleError::InvalidRequest { ref violations })
                if violations.len() == 1
                    && matches!(violations[0], IntakeViolation::DateInPast { .. })
        ));
    }

    #[test]
    fn approve_fixes_time_on_requested_date() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(10, 30));

        assert_eq!(scheduled.state(), AppointmentState::Scheduled);
        assert_eq!(scheduled.start(), Some(monday().and_time(hm(10, 30))));
        let last = scheduled.history().last().unwrap();
        assert_eq!(last.transition, Transition::Approve);
        assert_eq!(last.slot, Some(monday().and_time(hm(10, 30))));
        assert_eq!(last.at, now());
    }

    #[test]
    fn approve_outside_working_hours_fails() {
        let mut practice = Practice::new();
        let requested = practice.requested();

        let result = machine().approve(
            &requested,
            hm(16, 45),
            &Capability::doctor_of_record(),
            &practice.validator(),
        );

        assert_eq!(
            result,
            Err(LifecycleError::OutsideWorkingHours {
                requested: monday().and_time(hm(16, 45))
            })
        );
    }

    #[test]
    fn approve_into_taken_slot_fails() {
        let mut practice = Practice::new();
        practice.scheduled_at(hm(10, 30));
        let second = practice.requested();

        let result = machine().approve(&second, hm(10, 45), &Capability::admin(), &practice.validator());

        assert!(matches!(result, Err(LifecycleError::SlotConflict { .. })));
    }

    #[test]
    fn forbidden_takes_precedence_over_everything() {
        let mut practice = Practice::new();
        let completed = {
            let scheduled = practice.scheduled_at(hm(9, 0));
            machine()
                .complete(&scheduled, &Capability::doctor_of_record())
                .unwrap()
        };

        // Wrong state and a bad slot, but the permission error wins.
        let result = machine().approve(&completed, hm(20, 0), &Capability::NONE, &practice.validator());
        assert_eq!(
            result,
            Err(LifecycleError::Forbidden {
                attempted: Transition::Approve
            })
        );
    }

    #[test]
    fn approve_on_completed_is_invalid_transition() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(9, 0));
        let completed = machine()
            .complete(&scheduled, &Capability::doctor_of_record())
            .unwrap();

        let result = machine().approve(&completed, hm(11, 0), &Capability::admin(), &practice.validator());
        assert_eq!(
            result,
            Err(LifecycleError::InvalidTransition {
                current: AppointmentState::Completed,
                attempted: Transition::Approve,
            })
        );
    }

    #[test]
    fn reject_works_from_requested_and_scheduled() {
        let mut practice = Practice::new();
        let requested = practice.requested();
        let scheduled = practice.scheduled_at(hm(11, 0));

        let a = machine().reject(&requested, &Capability::admin()).unwrap();
        let b = machine()
            .reject(&scheduled, &Capability::doctor_of_record())
            .unwrap();

        assert_eq!(a.state(), AppointmentState::Rejected);
        assert_eq!(b.state(), AppointmentState::Rejected);
        assert_eq!(b.start(), scheduled.start());
        assert!(b.occupied_range().is_none());
    }

    #[test]
    fn rejected_appointment_cannot_be_rejected_again() {
        let mut practice = Practice::new();
        let rejected = machine()
            .reject(&practice.requested(), &Capability::admin())
            .unwrap();

        assert_eq!(
            machine().reject(&rejected, &Capability::admin()),
            Err(LifecycleError::InvalidTransition {
                current: AppointmentState::Rejected,
                attempted: Transition::Reject,
            })
        );
    }

    #[test]
    fn postpone_moves_slot_and_keeps_state() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(10, 30));
        let new_start = monday().and_time(hm(14, 0));

        let moved = machine()
            .postpone(&scheduled, new_start, &Capability::doctor_of_record(), &practice.validator())
            .unwrap();

        assert_eq!(moved.state(), AppointmentState::Scheduled);
        assert_eq!(moved.start(), Some(new_start));
        assert_eq!(moved.history().postponements(), 1);
    }

    #[test]
    fn postpone_to_last_instant_is_outside_working_hours() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(10, 30));

        let result = machine().postpone(
            &scheduled,
            NaiveDateTime::MAX,
            &Capability::admin(),
            &practice.validator(),
        );
        assert_eq!(
            result,
            Err(LifecycleError::OutsideWorkingHours {
                requested: NaiveDateTime::MAX
            })
        );
    }

    #[test]
    fn postpone_into_the_past_is_invalid() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(10, 30));

        let result = machine().postpone(
            &scheduled,
            now() - Duration::hours(1),
            &Capability::admin(),
            &practice.validator(),
        );
        assert!(matches!(result, Err(LifecycleError::InvalidRequest { .. })));
    }

    #[test]
    fn postpone_requires_capability() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(10, 30));

        let result = machine().postpone(
            &scheduled,
            monday().and_time(hm(15, 0)),
            &Capability::NONE,
            &practice.validator(),
        );
        assert_eq!(
            result,
            Err(LifecycleError::Forbidden {
                attempted: Transition::Postpone
            })
        );
    }

    #[test]
    fn postpone_on_requested_is_invalid_transition() {
        let mut practice = Practice::new();
        let requested = practice.requested();

        let result = machine().postpone(
            &requested,
            monday().and_time(hm(15, 0)),
            &Capability::admin(),
            &practice.validator(),
        );
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition {
                current: AppointmentState::Requested,
                attempted: Transition::Postpone,
            })
        ));
    }

    #[test]
    fn delete_needs_admin_and_works_from_any_state() {
        let mut practice = Practice::new();
        let requested = practice.requested();
        let completed = {
            let scheduled = practice.scheduled_at(hm(12, 0));
            machine().complete(&scheduled, &Capability::admin()).unwrap()
        };

        assert_eq!(
            machine().authorize_delete(&requested, &Capability::doctor_of_record()),
            Err(LifecycleError::Forbidden {
                attempted: Transition::Delete
            })
        );

        let deletion = machine()
            .authorize_delete(&completed, &Capability::admin())
            .unwrap();
        assert_eq!(deletion.appointment_id, completed.id());
        assert_eq!(deletion.last_state, AppointmentState::Completed);
    }

    #[test]
    fn closure_capability_checks_doctor_of_record() {
        let mut practice = Practice::new();
        let scheduled = practice.scheduled_at(hm(9, 30));
        let me = practice.doctor;
        let lookup = move |appointment: &Appointment| Capability {
            is_doctor_of_record: appointment.doctor_id() == me,
            is_admin: false,
        };
        let stranger = |_: &Appointment| Capability::NONE;

        assert!(machine().complete(&scheduled, &lookup).is_ok());
        assert!(matches!(
            machine().complete(&scheduled, &stranger),
            Err(LifecycleError::Forbidden { .. })
        ));
    }

    #[test]
    fn failed_transition_leaves_input_untouched() {
        let mut practice = Practice::new();
        let requested = practice.requested();
        let before = requested.clone();

        let _ = machine().complete(&requested, &Capability::admin());

        assert_eq!(requested, before);
    }

    #[test]
    fn configured_duration_drives_availability() {
        let mut practice = Practice::new();
        let requested = practice.requested();
        let hour_long = AppointmentStateMachine::new(
            SchedulingConfig::default().with_slot_duration(60),
            now(),
        )
        .unwrap();

        let result = hour_long.approve(&requested, hm(16, 30), &Capability::admin(), &practice.validator());
        assert!(matches!(result, Err(LifecycleError::OutsideWorkingHours { .. })));

        let scheduled = hour_long
            .approve(&requested, hm(16, 0), &Capability::admin(), &practice.validator())
            .unwrap();
        assert_eq!(scheduled.duration_minutes(), 60);
        assert_eq!(scheduled.end(), Some(monday().and_time(hm(17, 0))));
    }
}
