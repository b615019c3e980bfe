//! Generation provider adapters.
//!
//! ```text
//! GenerationClient --generate(request)--> &dyn GenerationProvider
//!                                              |
//!                          +-------------------+------------------+
//!                          v                                      v
//!                  CommandProvider                         FixtureProvider
//!          (bridge process, JSON on stdin)              (fixed payload)
//! ```

pub mod command;
pub mod fixture;
pub mod trait_def;
pub mod types;

pub use command::CommandProvider;
pub use fixture::FixtureProvider;
pub use trait_def::{GenerationProvider, ProviderError};
pub use types::GenerationRequest;
