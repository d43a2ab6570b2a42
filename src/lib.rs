//! Appointment Core: pure scheduling rules for a clinic
//!
//! The crate decides whether an appointment may be booked, moved, finished or
//! removed. It never touches storage, clocks or the network: callers pass in
//! the doctor's schedule, the existing appointments and the current time, and
//! get back either the next version of the appointment or an error saying why
//! not.
//!
//! # Core Concepts
//!
//! - **Schedule**: a doctor's recurring weekly availability blocks
//! - **Book**: the appointments already on the calendar, with overlap queries
//! - **Availability**: accept/reject verdicts for a candidate slot
//! - **Lifecycle**: the `REQUESTED → SCHEDULED → COMPLETED` state machine with
//!   capability checks and an immutable transition history
//!
//! # Example
//!
//! ```rust
//! use appointment_core::availability::AvailabilityValidator;
//! use appointment_core::book::AppointmentBook;
//! use appointment_core::config::SchedulingConfig;
//! use appointment_core::core::{AppointmentState, DoctorId, PatientId};
//! use appointment_core::lifecycle::{AppointmentRequest, AppointmentStateMachine, Capability};
//! use appointment_core::schedule::{DayOfWeek, WeeklySchedule};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let doctor = DoctorId::new();
//! let schedule = WeeklySchedule::builder(doctor)
//!     .block(
//!         DayOfWeek::Monday,
//!         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!         NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//! let mut book = AppointmentBook::new();
//!
//! let now = NaiveDate::from_ymd_opt(2030, 3, 1)
//!     .unwrap()
//!     .and_hms_opt(8, 0, 0)
//!     .unwrap();
//! let machine = AppointmentStateMachine::new(SchedulingConfig::default(), now).unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();
//! let requested = machine
//!     .request(AppointmentRequest::new(doctor, PatientId::new(), monday, "checkup"))
//!     .unwrap();
//! book.upsert(requested.clone());
//!
//! let scheduled = machine
//!     .approve(
//!         &requested,
//!         NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
//!         &Capability::doctor_of_record(),
//!         &AvailabilityValidator::new(&schedule, &book),
//!     )
//!     .unwrap();
//! assert_eq!(scheduled.state(), AppointmentState::Scheduled);
//! ```

pub mod availability;
pub mod book;
pub mod config;
pub mod core;
pub mod intake;
pub mod lifecycle;
pub mod schedule;
pub mod snapshot;

// Re-export commonly used types
pub use availability::{AvailabilityValidator, RejectReason, Verdict};
pub use book::{Appointment, AppointmentBook};
pub use config::SchedulingConfig;
pub use self::core::{AppointmentId, AppointmentState, DoctorId, PatientId, Transition};
pub use lifecycle::{AppointmentRequest, AppointmentStateMachine, Capability, LifecycleError};
pub use schedule::{AvailabilityBlock, DayOfWeek, WeeklySchedule};
pub use snapshot::PracticeSnapshot;
