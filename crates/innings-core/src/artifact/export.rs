//! Canonical Markdown export.

use std::fmt;

use super::model::Artifact;

/// Footer line closing every export.
pub const EXPORT_FOOTER: &str = "*Generated by Second Innings*";

/// Render `artifact` as Markdown.
///
/// Sections come in a fixed order and the pivot section appears only when
/// the artifact carries pivot options, so equal artifacts always produce
/// identical bytes.
pub fn to_markdown(artifact: &Artifact) -> String {
    Markdown(artifact).to_string()
}

/// Download filename for an artifact: the lowercased title with every
/// character outside `[a-z0-9]` replaced by `_`, plus `.md`.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect();
    format!("{stem}.md")
}

struct Markdown<'a>(&'a Artifact);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;

        writeln!(f, "# {}", a.title)?;
        writeln!(f)?;
        writeln!(f, "## CURRENT SITUATION")?;
        writeln!(f, "{}", a.situation_analysis)?;
        writeln!(f)?;

        writeln!(f, "## EXECUTION ROADMAP")?;
        for (i, phase) in a.phases.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "### Phase {}: {}", i + 1, phase.name)?;
            writeln!(f, "**Duration:** {}", phase.duration)?;
            for action in &phase.actions {
                writeln!(f, "- {action}")?;
            }
        }
        writeln!(f)?;

        if a.has_pivot_options() {
            writeln!(f, "## CAREER PIVOT OPTIONS")?;
            for option in a.pivot_options() {
                writeln!(f)?;
                writeln!(f, "### {}", option.role)?;
                writeln!(f, "- **Description:** {}", option.description)?;
                writeln!(f, "- **Pathway:** {}", option.pathway)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## KEY INSTITUTIONS")?;
        for institution in &a.institutions {
            writeln!(f, "- {institution}")?;
        }
        writeln!(f)?;

        writeln!(f, "## FINANCIAL AID")?;
        for tip in &a.aid_tips {
            writeln!(f, "- {tip}")?;
        }
        writeln!(f)?;

        writeln!(f, "---")?;
        writeln!(f, "{EXPORT_FOOTER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::model::{Phase, PivotOption};

    fn discovery_artifact() -> Artifact {
        Artifact {
            title: "Cricket Path".into(),
            situation_analysis: "Strong base.".into(),
            phases: vec![
                Phase {
                    name: "Grassroots".into(),
                    duration: "6 months".into(),
                    actions: vec!["Join a club".into(), "Net sessions".into()],
                },
                Phase {
                    name: "District".into(),
                    duration: "1 year".into(),
                    actions: vec![],
                },
            ],
            pivot_options: None,
            institutions: vec!["SAI Bengaluru".into()],
            aid_tips: vec!["Khelo India scholarship".into()],
        }
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let md = to_markdown(&discovery_artifact());
        let expected = "\
# Cricket Path

## CURRENT SITUATION
Strong base.

## EXECUTION ROADMAP

### Phase 1: Grassroots
**Duration:** 6 months
- Join a club
- Net sessions

### Phase 2: District
**Duration:** 1 year

## KEY INSTITUTIONS
- SAI Bengaluru

## FINANCIAL AID
- Khelo India scholarship

---
*Generated by Second Innings*
";
        assert_eq!(md, expected);
    }

    #[test]
    fn pivot_section_only_when_non_empty() {
        let mut artifact = discovery_artifact();
        artifact.pivot_options = Some(vec![]);
        assert!(!to_markdown(&artifact).contains("CAREER PIVOT OPTIONS"));

        artifact.pivot_options = Some(vec![PivotOption {
            role: "Umpire".into(),
            description: "Stay on the field.".into(),
            pathway: "BCCI Level 1".into(),
        }]);
        let md = to_markdown(&artifact);
        let pivot = md.find("## CAREER PIVOT OPTIONS").unwrap();
        assert!(md.find("## EXECUTION ROADMAP").unwrap() < pivot);
        assert!(pivot < md.find("## KEY INSTITUTIONS").unwrap());
        assert!(md.contains("### Umpire\n- **Description:** Stay on the field.\n- **Pathway:** BCCI Level 1\n"));
    }

    #[test]
    fn export_survives_serialize_and_parse() {
        let mut artifact = discovery_artifact();
        artifact.pivot_options = Some(vec![PivotOption {
            role: "Umpire".into(),
            description: "Stay on the field.".into(),
            pathway: "BCCI Level 1".into(),
        }]);

        let json = serde_json::to_string(&artifact).unwrap();
        let reparsed = crate::artifact::parse_artifact(&json).unwrap();
        assert_eq!(reparsed, artifact);
        assert_eq!(to_markdown(&reparsed), to_markdown(&artifact));

        let plain = discovery_artifact();
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("pivot_options"));
        assert_eq!(
            to_markdown(&crate::artifact::parse_artifact(&json).unwrap()),
            to_markdown(&plain)
        );
    }

    #[test]
    fn export_is_deterministic() {
        let artifact = discovery_artifact();
        assert_eq!(to_markdown(&artifact), to_markdown(&artifact.clone()));
    }

    #[test]
    fn filename_is_sanitized_title() {
        assert_eq!(export_filename("Cricket Path"), "cricket_path.md");
        assert_eq!(export_filename("Pivot Plan: Kabaddi!"), "pivot_plan__kabaddi_.md");
        assert_eq!(export_filename("U-19 Ranji 2025"), "u_19_ranji_2025.md");
        assert_eq!(export_filename("Café"), "caf_.md");
    }
}
