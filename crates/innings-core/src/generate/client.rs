//! The generation client.
//!
//! Every operation comes in two layers: a `try_*` call that reports what
//! went wrong, and a never-failing call that degrades to a fixed fallback
//! payload so callers always receive something displayable.

use std::sync::Arc;
use std::time::Duration;

use innings_db::models::FlowKind;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompt::{
    self, CheckIn, SUPPORT_INSTRUCTION, SYSTEM_INSTRUCTION, eligibility_prompt, skills_prompt,
    support_prompt,
};
use super::schema::roadmap_schema;
use crate::artifact::{Artifact, SkillTranslation};
use crate::intake::Profile;
use crate::provider::{GenerationProvider, GenerationRequest, ProviderError};

/// Deadline applied to every provider call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const ELIGIBILITY_FALLBACK: &str = "Could not connect to analysis engine.";
pub const ELIGIBILITY_EMPTY: &str = "Analysis unavailable.";
pub const SUPPORT_FALLBACK: &str =
    "We are having trouble connecting to the support engine. Please try again.";
pub const SUPPORT_EMPTY: &str = "Support system unavailable currently.";

/// Why a generation call produced no usable text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("the generation service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("missing credentials: environment variable {var} is not set")]
    MissingCredentials { var: String },

    #[error("the generation service rejected the request: {0}")]
    Rejected(String),

    #[error("the generation service is unreachable: {0}")]
    Transport(#[source] ProviderError),

    #[error("the generation service returned an empty response")]
    EmptyResponse,
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredentials { var } => Self::MissingCredentials { var },
            ProviderError::Rejected { status, message } if message.is_empty() => {
                Self::Rejected(status)
            }
            ProviderError::Rejected { message, .. } => Self::Rejected(message),
            other => Self::Transport(other),
        }
    }
}

/// Issues generation requests against a provider with a bounded deadline.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn GenerationProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!(
            provider = self.provider.name(),
            prompt_len = request.prompt.len(),
            json = request.json_output,
            "sending generation request"
        );

        let text = tokio::time::timeout(self.timeout, self.provider.generate(request))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    // -- Roadmaps --

    /// The request a roadmap generation for `profile` sends.
    pub fn roadmap_request(profile: &Profile) -> GenerationRequest {
        GenerationRequest::json(
            SYSTEM_INSTRUCTION,
            prompt::roadmap_prompt(profile),
            Some(roadmap_schema()),
        )
    }

    /// Generate a roadmap payload, reporting failures.
    ///
    /// The text is returned unvalidated; shape checks belong to the parser.
    pub async fn try_generate(&self, profile: &Profile) -> Result<String, GenerationError> {
        let flow = profile.flow();
        let text = self.call(&Self::roadmap_request(profile)).await?;
        info!(%flow, sport = profile.sport(), bytes = text.len(), "roadmap generated");
        Ok(text)
    }

    /// Generate a roadmap payload. Never fails: any error becomes a
    /// well-formed artifact titled "Error".
    pub async fn generate(&self, profile: &Profile) -> String {
        match self.try_generate(profile).await {
            Ok(text) => text,
            Err(err) => {
                warn!(flow = %profile.flow(), error = %err, "roadmap generation failed");
                error_artifact(profile.flow(), &err)
            }
        }
    }

    // -- Free-text and auxiliary operations --

    /// Ask whether a profile qualifies for a scheme.
    pub async fn analyze_eligibility(&self, profile_text: &str, scheme: &str) -> String {
        let request = GenerationRequest::text(
            SYSTEM_INSTRUCTION,
            eligibility_prompt(profile_text, scheme),
        );
        match self.call(&request).await {
            Ok(text) => text,
            Err(GenerationError::EmptyResponse) => ELIGIBILITY_EMPTY.to_string(),
            Err(err) => {
                warn!(error = %err, "eligibility analysis failed");
                ELIGIBILITY_FALLBACK.to_string()
            }
        }
    }

    /// Map on-field experience to corporate skills. Returns JSON text.
    pub async fn translate_skills(&self, sport: &str, role: &str) -> String {
        let request = GenerationRequest::json(SYSTEM_INSTRUCTION, skills_prompt(sport, role), None);
        match self.call(&request).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "skill translation failed");
                skills_fallback()
            }
        }
    }

    /// A supportive Markdown message for a wellbeing check-in.
    pub async fn mental_support(&self, check_in: &CheckIn) -> String {
        let request = GenerationRequest::text(SUPPORT_INSTRUCTION, support_prompt(check_in));
        match self.call(&request).await {
            Ok(text) => text,
            Err(GenerationError::EmptyResponse) => SUPPORT_EMPTY.to_string(),
            Err(err) => {
                warn!(error = %err, "support message failed");
                SUPPORT_FALLBACK.to_string()
            }
        }
    }
}

/// Human-readable explanation placed in the error artifact.
fn failure_analysis(flow: FlowKind, err: &GenerationError) -> String {
    let what = match flow {
        FlowKind::Discovery => "roadmap",
        FlowKind::Pivot => "pivot plan",
    };
    let advice = match err {
        GenerationError::MissingCredentials { .. } => {
            "Please ensure your API key is configured and try again."
        }
        GenerationError::Timeout(_) => {
            "The generation service took too long to answer. Please try again."
        }
        GenerationError::EmptyResponse => {
            "The generation service returned nothing. Please try again."
        }
        GenerationError::Rejected(_) | GenerationError::Transport(_) => {
            "Please ensure your API key is valid and try again."
        }
    };
    format!("Failed to generate {what}. {advice}")
}

/// The degraded payload for a failed roadmap generation.
pub fn error_artifact(flow: FlowKind, err: &GenerationError) -> String {
    let artifact = Artifact::error(failure_analysis(flow, err));
    serde_json::to_string(&artifact).unwrap_or_else(|_| {
        r#"{"title":"Error","current_status_analysis":"Generation failed.","roadmap_steps":[],"key_institutions":[],"financial_aid_tips":[]}"#.to_string()
    })
}

fn skills_fallback() -> String {
    serde_json::to_string(&SkillTranslation::fallback()).unwrap_or_else(|_| {
        r#"{"core_transferable_skill":"Error","corporate_translation":"Failed to translate.","suggested_roles":[]}"#.to_string()
    })
}
