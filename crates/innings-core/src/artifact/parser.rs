//! Tolerant-but-strict parsing of provider payloads.

use thiserror::Error;

use super::model::Artifact;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ArtifactParseError {
    #[error("artifact is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("artifact has no title")]
    MissingTitle,

    #[error("{0} is missing")]
    MissingField(&'static str),
}

/// Remove a leading code-fence line (```json, ```JSON, or bare ```) and a
/// trailing fence, if present.
pub fn strip_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            // Single-line payload: drop only the fence label.
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Decode a payload into an [`Artifact`].
///
/// Fails on malformed JSON or a blank title. Missing fields are never
/// guessed.
pub fn parse_artifact(text: &str) -> Result<Artifact, ArtifactParseError> {
    let artifact: Artifact = serde_json::from_str(strip_fences(text))?;
    if artifact.title.trim().is_empty() {
        return Err(ArtifactParseError::MissingTitle);
    }
    Ok(artifact)
}
