//! Input rules for transitions.
//!
//! Rules accumulate every violation with Stillwater's `Validation` rather
//! than stopping at the first, so a caller can report all problems with a
//! request in one response.
//!
//! # Example
//!
//! ```rust
//! use appointment_core::intake::{into_result, IntakeRules, IntakeViolation};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2030, 3, 4)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let last_week = NaiveDate::from_ymd_opt(2030, 2, 25).unwrap();
//!
//! let rules = IntakeRules::new(5);
//! let violations = into_result(rules.check_request(last_week, "too long", now)).unwrap_err();
//! assert_eq!(violations.len(), 2);
//! ```

mod rules;
mod violations;

pub use rules::{into_result, IntakeCheck, IntakeRules};
pub use violations::IntakeViolation;
