//! Skill translation results.

use serde::{Deserialize, Serialize};

use super::parser::{ArtifactParseError, strip_fences};

/// How on-field experience maps onto corporate or tech work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTranslation {
    #[serde(default)]
    pub core_transferable_skill: String,
    #[serde(default)]
    pub corporate_translation: String,
    #[serde(default)]
    pub suggested_roles: Vec<String>,
}

impl SkillTranslation {
    /// The payload returned when translation fails.
    pub fn fallback() -> Self {
        Self {
            core_transferable_skill: "Error".to_string(),
            corporate_translation: "Failed to translate.".to_string(),
            suggested_roles: Vec::new(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ArtifactParseError> {
        let translation: Self = serde_json::from_str(strip_fences(text))?;
        if translation.core_transferable_skill.trim().is_empty() {
            return Err(ArtifactParseError::MissingField("core_transferable_skill"));
        }
        Ok(translation)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_translation() {
        let t = SkillTranslation::parse(
            r#"{"core_transferable_skill":"Risk Assessment","corporate_translation":"Reading the pitch is reading the market.","suggested_roles":["Risk Analyst"]}"#,
        )
        .unwrap();
        assert_eq!(t.core_transferable_skill, "Risk Assessment");
        assert_eq!(t.suggested_roles, vec!["Risk Analyst"]);
        assert!(!t.is_fallback());
    }

    #[test]
    fn fallback_wire_format() {
        let json = serde_json::to_string(&SkillTranslation::fallback()).unwrap();
        assert_eq!(
            json,
            r#"{"core_transferable_skill":"Error","corporate_translation":"Failed to translate.","suggested_roles":[]}"#
        );
        assert!(SkillTranslation::parse(&json).unwrap().is_fallback());
    }

    #[test]
    fn empty_object_is_rejected() {
        assert!(SkillTranslation::parse("{}").is_err());
    }
}
