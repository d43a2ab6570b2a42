//! The legal-transition table.

use super::state::AppointmentState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation that moves an appointment through its lifecycle.
///
/// | Transition | From                    | To          |
/// |------------|-------------------------|-------------|
/// | request    | (none)                  | REQUESTED   |
/// | approve    | REQUESTED               | SCHEDULED   |
/// | reject     | REQUESTED or SCHEDULED  | REJECTED    |
/// | postpone   | SCHEDULED               | SCHEDULED   |
/// | complete   | SCHEDULED               | COMPLETED   |
/// | delete     | any                     | (removed)   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Request,
    Approve,
    Reject,
    Postpone,
    Complete,
    Delete,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Postpone => "postpone",
            Self::Complete => "complete",
            Self::Delete => "delete",
        }
    }

    /// Whether the transition may start from `current`.
    ///
    /// `None` stands for "no appointment yet", the only legal origin of
    /// [`Transition::Request`].
    ///
    /// ```rust
    /// use appointment_core::core::{AppointmentState, Transition};
    ///
    /// assert!(Transition::Request.permits_from(None));
    /// assert!(Transition::Approve.permits_from(Some(AppointmentState::Requested)));
    /// assert!(!Transition::Complete.permits_from(Some(AppointmentState::Requested)));
    /// ```
    pub fn permits_from(&self, current: Option<AppointmentState>) -> bool {
        use AppointmentState::*;
        match (self, current) {
            (Self::Request, None) => true,
            (Self::Approve, Some(Requested)) => true,
            (Self::Reject, Some(Requested | Scheduled)) => true,
            (Self::Postpone, Some(Scheduled)) => true,
            (Self::Complete, Some(Scheduled)) => true,
            (Self::Delete, Some(_)) => true,
            _ => false,
        }
    }

    /// State reached after the transition; `None` for deletion.
    pub fn target(&self) -> Option<AppointmentState> {
        match self {
            Self::Request => Some(AppointmentState::Requested),
            Self::Approve | Self::Postpone => Some(AppointmentState::Scheduled),
            Self::Reject => Some(AppointmentState::Rejected),
            Self::Complete => Some(AppointmentState::Completed),
            Self::Delete => None,
        }
    }

    /// Transitions that fix or change a concrete date-time and therefore
    /// go through the availability validator.
    pub fn assigns_time(&self) -> bool {
        matches!(self, Self::Approve | Self::Postpone)
    }

    /// Transitions only an administrator may perform.
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Delete)
    }

    /// Committed transitions after which the patient should be told.
    pub fn notifies_patient(&self) -> bool {
        matches!(self, Self::Approve | Self::Reject | Self::Postpone)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
