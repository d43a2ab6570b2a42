//! Input violations.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem with caller-supplied input to a transition.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeViolation {
    #[error("Requested date {requested} is before today ({today})")]
    DateInPast {
        requested: NaiveDate,
        today: NaiveDate,
    },

    #[error("New appointment time {requested} must be in the future (now: {now})")]
    NotInFuture {
        requested: NaiveDateTime,
        now: NaiveDateTime,
    },

    #[error("Reason is {length} characters long, at most {max} allowed")]
    ReasonTooLong { length: usize, max: usize },
}
