//! Candidate slots and interval overlap.

use crate::core::DoctorId;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// intersect iff each starts before the other ends.
///
/// Back-to-back ranges (`a_end == b_start`) do not overlap.
pub fn ranges_overlap(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Ephemeral time range proposed for an appointment; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub doctor_id: DoctorId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    /// `None` when the end would fall past the last representable instant.
    pub fn new(doctor_id: DoctorId, start: NaiveDateTime, duration_minutes: u32) -> Option<Self> {
        let end = start.checked_add_signed(Duration::minutes(i64::from(duration_minutes)))?;
        Some(Self {
            doctor_id,
            start,
            end,
        })
    }

    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        ranges_overlap(self.start, self.end, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 3, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn slot_end_is_start_plus_duration() {
        let slot = Slot::new(DoctorId::new(), at(10, 30), 30).unwrap();
        assert_eq!(slot.end, at(11, 0));
    }

    #[test]
    fn partial_overlap_is_detected() {
        let slot = Slot::new(DoctorId::new(), at(10, 45), 30).unwrap();
        assert!(slot.overlaps(at(10, 30), at(11, 0)));
        assert!(slot.overlaps(at(11, 0), at(11, 30)));
    }

    #[test]
    fn containment_is_overlap() {
        let slot = Slot::new(DoctorId::new(), at(10, 0), 60).unwrap();
        assert!(slot.overlaps(at(10, 15), at(10, 30)));
        assert!(ranges_overlap(at(10, 15), at(10, 30), at(10, 0), at(11, 0)));
    }

    #[test]
    fn back_to_back_is_not_overlap() {
        let slot = Slot::new(DoctorId::new(), at(11, 0), 30).unwrap();
        assert!(!slot.overlaps(at(10, 30), at(11, 0)));
        assert!(!slot.overlaps(at(11, 30), at(12, 0)));
    }

    #[test]
    fn slot_past_end_of_time_is_none() {
        assert_eq!(Slot::new(DoctorId::new(), NaiveDateTime::MAX, 1), None);
        assert!(Slot::new(DoctorId::new(), NaiveDateTime::MAX, 0).is_some());
    }

    #[test]
    fn identical_ranges_overlap() {
        assert!(ranges_overlap(at(9, 0), at(9, 30), at(9, 0), at(9, 30)));
    }
}
