//! The request sent to a generation provider.

use serde::Serialize;
use serde_json::Value;

/// One generation request, serialized as-is for command providers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// Fixed behavioural instruction for the provider.
    pub system_instruction: String,
    /// The task prompt built from the user's input.
    pub prompt: String,
    /// Output-shape contract the provider must follow, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    /// Ask for a JSON document rather than free text.
    pub json_output: bool,
}

impl GenerationRequest {
    /// A free-text request with no shape contract.
    pub fn text(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
            response_schema: None,
            json_output: false,
        }
    }

    /// Request a JSON document, optionally constrained by `schema`.
    pub fn json(
        system_instruction: impl Into<String>,
        prompt: impl Into<String>,
        schema: Option<Value>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
            response_schema: schema,
            json_output: true,
        }
    }
}
