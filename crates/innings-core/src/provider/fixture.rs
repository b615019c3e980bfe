//! Fixture provider: replays a fixed payload for every request.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::trait_def::{GenerationProvider, ProviderError};
use super::types::GenerationRequest;

#[derive(Debug, Clone)]
pub struct FixtureProvider {
    payload: String,
}

impl FixtureProvider {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Load the payload from a file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let payload = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::new(payload))
    }
}

#[async_trait]
impl GenerationProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        debug!(prompt_len = request.prompt.len(), "fixture provider answered");
        Ok(self.payload.clone())
    }
}
