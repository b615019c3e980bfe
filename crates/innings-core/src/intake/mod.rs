//! Profile intake state machines.
//!
//! Two flows collect a [`Profile`] before generation:
//!
//! ```text
//! pivot:      intro -> constraints -> identity -> physical -> role -> urgency
//!                 ^                                                      |
//!                 |                                                      v
//!                 +------------- reset ------------ results <------ generating
//!
//! discovery:  configuring <--- back to config / submit ---> results
//! ```
//!
//! Both machines can also start directly in `results` from a stored
//! artifact, bypassing intake.

pub mod discovery;
pub mod pivot;
pub mod profile;

use thiserror::Error;

pub use discovery::{DiscoveryFlow, DiscoveryForm, DiscoveryState};
pub use pivot::{PivotIntake, PivotStep};
pub use profile::{
    ConstraintTag, DiscoveryProfile, FinancialUrgency, IdentityScore, Level, LockerRoomRole,
    PhysicalCapacity, PivotProfile, Profile, DEFAULT_SPORT,
};

/// Validation and transition errors raised by the intake flows.
///
/// None of these change state: the machine stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("years played is required before continuing")]
    YearsPlayedRequired,

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("age must be a positive whole number, got {0:?}")]
    InvalidAge(String),

    #[error("identity score must be between 1 and 10, got {0}")]
    IdentityScoreOutOfRange(u8),

    #[error("cannot {action} during the {step} step")]
    WrongStep {
        action: &'static str,
        step: &'static str,
    },

    #[error("a generation request is already in flight")]
    GenerationInFlight,

    #[error("unknown {kind} {value:?}")]
    UnknownOption { kind: &'static str, value: String },
}
