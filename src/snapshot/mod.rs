//! Persistence boundary for one doctor's practice.
//!
//! A [`PracticeSnapshot`] bundles a doctor's weekly schedule and appointment
//! book so the orchestration layer can store them between requests and
//! rebuild an [`AvailabilityValidator`] on the other side. Two encodings are
//! supported: JSON for storage that humans read and bincode for compact
//! blobs. Both are versioned.

mod error;

pub use error::SnapshotError;

use crate::availability::AvailabilityValidator;
use crate::book::AppointmentBook;
use crate::schedule::WeeklySchedule;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// Caller-supplied instant the snapshot was taken
    pub taken_at: NaiveDateTime,

    pub schedule: WeeklySchedule,
    pub book: AppointmentBook,
}

impl PracticeSnapshot {
    pub fn new(schedule: WeeklySchedule, book: AppointmentBook, taken_at: NaiveDateTime) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at,
            schedule,
            book,
        }
    }

    /// Availability view over the captured schedule and book.
    pub fn validator(&self) -> AvailabilityValidator<'_> {
        AvailabilityValidator::new(&self.schedule, &self.book)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.verify()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.verify()
    }

    fn verify(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let doctor_id = self.schedule.doctor_id();
        if let Some(foreign) = self.book.iter().find(|a| a.doctor_id() != doctor_id) {
            return Err(SnapshotError::ValidationFailed(format!(
                "appointment {} belongs to doctor {}, not {}",
                foreign.id(),
                foreign.doctor_id(),
                doctor_id
            )));
        }

        debug!(
            snapshot_id = %self.id,
            doctor_id = %doctor_id,
            appointments = self.book.len(),
            "snapshot restored"
        );
        Ok(self)
    }
}
