//! Identifier newtypes.
//!
//! Ids are opaque to the scheduling core. The orchestration layer mints
//! them (usually from storage) and the core only compares them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an id that already exists in storage.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype! {
    /// Identifies a single appointment.
    AppointmentId
}

id_newtype! {
    /// Identifies a doctor; lookups of schedules and appointments are keyed by it.
    DoctorId
}

id_newtype! {
    /// Identifies a patient.
    PatientId
}

id_newtype! {
    /// Identifies one availability block inside a weekly schedule.
    BlockId
}
