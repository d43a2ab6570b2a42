//! Appointment lifecycle.
//!
//! [`AppointmentStateMachine`] is the only way an appointment changes state.
//! Every operation is a pure function of the current appointment, the
//! actor's [`Capability`], the caller-supplied "now" and, where a time is
//! assigned, an [`AvailabilityValidator`](crate::availability::AvailabilityValidator).
//! Persisting the result and notifying the patient are left to the caller;
//! [`Transition::notifies_patient`](crate::core::Transition::notifies_patient)
//! says when a notification is due.
//!
//! ```text
//! (none) --request--> REQUESTED --approve--> SCHEDULED --complete--> COMPLETED
//!                         |                   |    ^
//!                         |                   |    | postpone
//!                         |                   +----+
//!                         +--reject--> REJECTED <--reject-- SCHEDULED
//! ```

mod capability;
mod error;
mod machine;
mod request;

pub use capability::{CanActOnAppointment, Capability};
pub use error::LifecycleError;
pub use machine::AppointmentStateMachine;
pub use request::{AppointmentRequest, Deletion};
