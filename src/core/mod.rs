//! Shared vocabulary of the scheduling core.
//!
//! - Id newtypes for appointments, doctors, patients and schedule blocks
//! - The `AppointmentState` enumeration
//! - The legal-transition table (`Transition`)
//! - Immutable transition history
//!
//! Nothing in this module performs I/O or reads a clock.

mod history;
mod ids;
mod state;
mod transition;

pub use history::{TransitionHistory, TransitionRecord};
pub use ids::{AppointmentId, BlockId, DoctorId, PatientId};
pub use state::AppointmentState;
pub use transition::Transition;
