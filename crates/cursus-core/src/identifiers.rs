//! Arena-style identifiers for organizational entities
//!
//! Every entity is addressed by an opaque integer newtype rather than by a
//! live object reference. Containment is expressed as edges between these
//! ids, which keeps ownership acyclic and lets the ancestry walk run over
//! plain lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an identifier cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier: {input}")]
pub struct ParseIdError {
    /// Identifier kind that was expected
    pub kind: &'static str,
    /// Rejected input
    pub input: String,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Display prefix for this identifier kind
            pub const PREFIX: &'static str = $prefix;

            /// Create from a raw integer
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw integer
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Handle both bare integers and prefixed format
                let raw = s
                    .strip_prefix(concat!($prefix, "-"))
                    .unwrap_or(s);
                raw.parse::<u64>().map(Self).map_err(|_| ParseIdError {
                    kind: $prefix,
                    input: s.to_string(),
                })
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Regional Technological Institute identifier (top-level organizational unit)
    RtiId,
    "rti"
);
define_id!(
    /// Campus identifier; the scope unit for most positions
    CampusId,
    "campus"
);
define_id!(
    /// Program identifier; a program may be offered at several campuses
    ProgramId,
    "program"
);
define_id!(
    /// Term identifier; belongs to exactly one program
    TermId,
    "term"
);
define_id!(
    /// Curricular unit identifier; belongs to exactly one term
    CurricularUnitId,
    "curricular_unit"
);
define_id!(
    /// Course identifier; belongs to exactly one curricular unit
    CourseId,
    "course"
);
define_id!(
    /// Weekly planning identifier; belongs to exactly one course
    WeeklyPlanningId,
    "weekly_planning"
);
define_id!(
    /// Programmatic content identifier; belongs to exactly one weekly planning
    ProgrammaticContentId,
    "programmatic_content"
);
define_id!(
    /// Activity identifier; belongs to exactly one programmatic content
    ActivityId,
    "activity"
);
define_id!(
    /// User identifier
    UserId,
    "user"
);
define_id!(
    /// Position identifier
    PositionId,
    "position"
);
