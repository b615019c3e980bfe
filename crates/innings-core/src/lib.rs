//! Core logic for Second Innings: profile intake, roadmap generation and
//! artifact handling.
//!
//! ```text
//! intake (PivotIntake / DiscoveryFlow)
//!     |  Profile
//!     v
//! generate::GenerationClient --request--> provider::GenerationProvider
//!     |  payload text (never an error)
//!     v
//! artifact::parse_artifact --> RoadmapView / Markdown export
//!     |
//!     v
//! service::save_* --> innings_db::LocalStore
//! ```

pub mod artifact;
pub mod generate;
pub mod intake;
pub mod provider;
pub mod service;

pub use artifact::{Artifact, ResultView, RoadmapView, parse_artifact, to_markdown};
pub use generate::{GenerationClient, GenerationError};
pub use intake::{DiscoveryFlow, IntakeError, PivotIntake, Profile};
pub use provider::{CommandProvider, FixtureProvider, GenerationProvider, ProviderError};
