//! Actor capability checks.
//!
//! The state machine never resolves roles. Callers decide, per appointment,
//! whether the acting user is the doctor of record and whether they are an
//! administrator, and hand that answer in as a [`Capability`].

use crate::book::Appointment;
use crate::core::Transition;
use serde::{Deserialize, Serialize};

/// Precomputed permissions of the acting user on one appointment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub is_doctor_of_record: bool,
    pub is_admin: bool,
}

impl Capability {
    /// No special rights; enough only to file a request.
    pub const NONE: Capability = Capability {
        is_doctor_of_record: false,
        is_admin: false,
    };

    pub fn doctor_of_record() -> Self {
        Self {
            is_doctor_of_record: true,
            is_admin: false,
        }
    }

    pub fn admin() -> Self {
        Self {
            is_doctor_of_record: false,
            is_admin: true,
        }
    }

    /// Approve, reject, postpone and complete need the doctor of record or an admin.
    pub fn may_manage(&self) -> bool {
        self.is_doctor_of_record || self.is_admin
    }

    pub fn permits(&self, transition: Transition) -> bool {
        match transition {
            Transition::Request => true,
            t if t.requires_admin() => self.is_admin,
            _ => self.may_manage(),
        }
    }
}

/// Answers "what may this actor do to this appointment?".
///
/// Implemented by [`Capability`] itself (a fixed answer) and by any
/// `Fn(&Appointment) -> Capability`, so callers can plug in their own
/// lookup.
///
/// ```rust
/// use appointment_core::book::Appointment;
/// use appointment_core::core::DoctorId;
/// use appointment_core::lifecycle::{CanActOnAppointment, Capability};
///
/// let me = DoctorId::new();
/// let lookup = move |appointment: &Appointment| Capability {
///     is_doctor_of_record: appointment.doctor_id() == me,
///     is_admin: false,
/// };
/// # fn assert_impl<T: CanActOnAppointment>(_: &T) {}
/// assert_impl(&lookup);
/// ```
pub trait CanActOnAppointment {
    fn capability_for(&self, appointment: &Appointment) -> Capability;
}

impl CanActOnAppointment for Capability {
    fn capability_for(&self, _appointment: &Appointment) -> Capability {
        *self
    }
}

impl<F> CanActOnAppointment for F
where
    F: Fn(&Appointment) -> Capability,
{
    fn capability_for(&self, appointment: &Appointment) -> Capability {
        self(appointment)
    }
}
