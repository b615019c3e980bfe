//! The `GenerationProvider` trait, the seam to external text generators.
//!
//! The trait is object-safe so the client can hold an
//! `Arc<dyn GenerationProvider>` and tests can swap in stubs.

use async_trait::async_trait;
use thiserror::Error;

use super::types::GenerationRequest;

/// Failures reported by a provider adapter.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured credential variable is not set.
    #[error("missing credentials: environment variable {var} is not set")]
    MissingCredentials { var: String },

    /// The provider process could not be started.
    #[error("failed to start provider `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The provider answered with a failure.
    #[error("provider rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },

    #[error("provider I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Adapter interface for text-generation backends.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short name used in logs (e.g. "command", "fixture").
    fn name(&self) -> &str;

    /// Issue exactly one request and return the raw response text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

// Compile-time assertion: GenerationProvider must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn GenerationProvider) {}
};
