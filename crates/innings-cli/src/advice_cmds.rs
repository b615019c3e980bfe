//! One-shot advice commands: scheme eligibility, skill translation and the
//! well-being check-in.

use anyhow::Result;

use innings_core::GenerationClient;
use innings_core::artifact::SkillTranslation;
use innings_core::generate::CheckIn;

/// Print a scheme eligibility analysis.
pub async fn run_eligibility(client: &GenerationClient, profile: &str, scheme: &str) -> Result<()> {
    let text = client.analyze_eligibility(profile, scheme).await;
    println!("{}", text.trim());
    Ok(())
}

/// Print how a sport role translates to corporate work.
pub async fn run_skills(client: &GenerationClient, sport: &str, role: &str) -> Result<()> {
    let raw = client.translate_skills(sport, role).await;
    let translation = SkillTranslation::parse(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "skill translation payload not understood");
        SkillTranslation::fallback()
    });
    print!("{}", format_translation(&translation));
    Ok(())
}

pub fn format_translation(t: &SkillTranslation) -> String {
    let mut out = format!(
        "Core skill: {}\n\n{}\n",
        t.core_transferable_skill, t.corporate_translation
    );
    if !t.suggested_roles.is_empty() {
        out.push_str("\nSuggested roles:\n");
        for role in &t.suggested_roles {
            out.push_str("  - ");
            out.push_str(role);
            out.push('\n');
        }
    }
    out
}

/// Print a supportive reply to a well-being check-in.
pub async fn run_support(client: &GenerationClient, check_in: &CheckIn) -> Result<()> {
    let text = client.mental_support(check_in).await;
    println!("{}", text.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_lists_roles() {
        let t = SkillTranslation {
            core_transferable_skill: "Reading the game".into(),
            corporate_translation: "Strategic analysis under pressure.".into(),
            suggested_roles: vec!["Business Analyst".into(), "Scout".into()],
        };
        assert_eq!(
            format_translation(&t),
            "Core skill: Reading the game\n\nStrategic analysis under pressure.\n\n\
             Suggested roles:\n  - Business Analyst\n  - Scout\n"
        );
    }

    #[test]
    fn fallback_has_no_role_list() {
        let text = format_translation(&SkillTranslation::fallback());
        assert!(text.starts_with("Core skill: Error\n"));
        assert!(!text.contains("Suggested roles"));
    }
}
