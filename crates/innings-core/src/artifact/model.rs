//! The structured career plan produced by generation.
//!
//! Field names on the wire follow the stored payload format
//! (`current_status_analysis`, `roadmap_steps`, ...). Sequence fields that
//! are absent or `null` decode as empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Title carried by the synthetic artifact produced when generation fails.
pub const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(
        rename = "current_status_analysis",
        default,
        deserialize_with = "null_as_default"
    )]
    pub situation_analysis: String,

    #[serde(rename = "roadmap_steps", default, deserialize_with = "null_as_default")]
    pub phases: Vec<Phase>,

    /// Present only on pivot-flow artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_options: Option<Vec<PivotOption>>,

    #[serde(rename = "key_institutions", default, deserialize_with = "null_as_default")]
    pub institutions: Vec<String>,

    #[serde(rename = "financial_aid_tips", default, deserialize_with = "null_as_default")]
    pub aid_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "phase", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotOption {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathway: String,
}

impl Artifact {
    /// The degraded artifact returned in place of a failed generation.
    pub fn error(analysis: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            situation_analysis: analysis.into(),
            ..Self::default()
        }
    }

    /// Pivot options, empty when the artifact has none.
    pub fn pivot_options(&self) -> &[PivotOption] {
        self.pivot_options.as_deref().unwrap_or_default()
    }

    pub fn has_pivot_options(&self) -> bool {
        !self.pivot_options().is_empty()
    }

    /// Whether this is the synthetic failure artifact.
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE && self.phases.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_map_to_fields() {
        let json = r#"{
            "title": "T",
            "current_status_analysis": "S",
            "roadmap_steps": [{"phase": "P1", "duration": "3 months", "actions": ["a"]}],
            "pivot_options": [{"role": "Coach", "description": "d", "pathway": "NIS"}],
            "key_institutions": ["SAI"],
            "financial_aid_tips": ["Khelo India"]
        }"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.situation_analysis, "S");
        assert_eq!(artifact.phases[0].name, "P1");
        assert_eq!(artifact.pivot_options()[0].pathway, "NIS");
        assert_eq!(artifact.institutions, vec!["SAI"]);
        assert_eq!(artifact.aid_tips, vec!["Khelo India"]);
    }

    #[test]
    fn absent_and_null_sequences_are_empty() {
        let artifact: Artifact =
            serde_json::from_str(r#"{"title": "T", "roadmap_steps": null, "key_institutions": null}"#)
                .unwrap();
        assert!(artifact.phases.is_empty());
        assert!(artifact.institutions.is_empty());
        assert!(artifact.aid_tips.is_empty());
        assert!(artifact.pivot_options.is_none());
        assert!(!artifact.has_pivot_options());

        let phase: Phase = serde_json::from_str(r#"{"phase": "P", "actions": null}"#).unwrap();
        assert!(phase.actions.is_empty());
        assert!(phase.duration.is_empty());
    }

    #[test]
    fn error_artifact_serializes_with_empty_sequences() {
        let value = serde_json::to_value(Artifact::error("boom")).unwrap();
        assert_eq!(value["title"], "Error");
        assert_eq!(value["current_status_analysis"], "boom");
        assert_eq!(value["roadmap_steps"], serde_json::json!([]));
        assert_eq!(value["key_institutions"], serde_json::json!([]));
        assert_eq!(value["financial_aid_tips"], serde_json::json!([]));
        assert!(value.get("pivot_options").is_none());
    }
}
