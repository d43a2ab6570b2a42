//! Input rules for requests and postponements.

use super::violations::IntakeViolation;
use crate::config::SchedulingConfig;
use chrono::{NaiveDate, NaiveDateTime};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type IntakeCheck = Validation<(), NonEmptyVec<IntakeViolation>>;

/// Rules applied to caller input before a transition touches availability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntakeRules {
    max_reason_length: usize,
}

impl IntakeRules {
    pub fn new(max_reason_length: usize) -> Self {
        Self { max_reason_length }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(config.max_reason_length)
    }

    /// A request needs a date no earlier than today and a reason within the
    /// length limit. Both are checked; every failure is reported.
    pub fn check_request(&self, date: NaiveDate, reason: &str, now: NaiveDateTime) -> IntakeCheck {
        let today = now.date();
        let date_check: IntakeCheck = if date < today {
            Validation::fail(IntakeViolation::DateInPast {
                requested: date,
                today,
            })
        } else {
            Validation::success(())
        };

        let length = reason.chars().count();
        let reason_check: IntakeCheck = if length > self.max_reason_length {
            Validation::fail(IntakeViolation::ReasonTooLong {
                length,
                max: self.max_reason_length,
            })
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![date_check, reason_check]).map(|_| ())
    }

    /// A postponement must move the appointment strictly into the future.
    pub fn check_postpone(&self, requested: NaiveDateTime, now: NaiveDateTime) -> IntakeCheck {
        if requested <= now {
            Validation::fail(IntakeViolation::NotInFuture { requested, now })
        } else {
            Validation::success(())
        }
    }
}

/// Collapse an accumulated check into a `Result` carrying every violation.
pub fn into_result(check: IntakeCheck) -> Result<(), Vec<IntakeViolation>> {
    match check {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => Err(violations.iter().cloned().collect()),
    }
}
