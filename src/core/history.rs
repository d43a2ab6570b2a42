//! Appointment transition history.
//!
//! Every committed transition leaves an immutable record behind. Recording
//! never mutates an existing history; it returns a new one.

use super::state::AppointmentState;
use super::transition::Transition;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use appointment_core::core::{AppointmentState, Transition, TransitionRecord};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2030, 3, 4)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
///
/// let record = TransitionRecord {
///     from: None,
///     to: AppointmentState::Requested,
///     transition: Transition::Request,
///     at,
///     slot: None,
/// };
/// assert_eq!(record.to, AppointmentState::Requested);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the transition; `None` for the initial request
    pub from: Option<AppointmentState>,
    /// State after the transition
    pub to: AppointmentState,
    /// Which operation was applied
    pub transition: Transition,
    /// Caller-supplied instant at which the decision was taken
    pub at: NaiveDateTime,
    /// Concrete slot start assigned by this transition, if any
    pub slot: Option<NaiveDateTime>,
}

/// Ordered history of an appointment's transitions.
///
/// ```rust
/// use appointment_core::core::{AppointmentState, Transition, TransitionHistory, TransitionRecord};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2030, 3, 4)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
///
/// let history = TransitionHistory::new().record(TransitionRecord {
///     from: None,
///     to: AppointmentState::Requested,
///     transition: Transition::Request,
///     at,
///     slot: None,
/// });
///
/// let history = history.record(TransitionRecord {
///     from: Some(AppointmentState::Requested),
///     to: AppointmentState::Rejected,
///     transition: Transition::Reject,
///     at,
///     slot: None,
/// });
///
/// assert_eq!(
///     history.path(),
///     vec![AppointmentState::Requested, AppointmentState::Rejected]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
}

impl TransitionHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// States visited, in order, starting with the state the first record
    /// moved into.
    pub fn path(&self) -> Vec<AppointmentState> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(from) = self.records.first().and_then(|r| r.from) {
            path.push(from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// Number of times the appointment was moved to a new slot.
    pub fn postponements(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.transition == Transition::Postpone)
            .count()
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
