//! Turning profiles into generation requests.

pub mod client;
pub mod prompt;
pub mod schema;

pub use client::{
    DEFAULT_TIMEOUT, ELIGIBILITY_EMPTY, ELIGIBILITY_FALLBACK, GenerationClient, GenerationError,
    SUPPORT_EMPTY, SUPPORT_FALLBACK, error_artifact,
};
pub use prompt::{CheckIn, SUPPORT_INSTRUCTION, SYSTEM_INSTRUCTION};
pub use schema::roadmap_schema;
