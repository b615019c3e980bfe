//! Plain-terminal rendering of results.

use std::fmt::Write;

use innings_core::artifact::{ResultView, RoadmapView};

/// Format a roadmap view for the terminal.
///
/// Collapsed phases show only their header; `expand_all` opens every phase.
pub fn format_view(view: &RoadmapView, expand_all: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_view(&mut out, view, expand_all);
    out
}

fn write_view(out: &mut String, view: &RoadmapView, expand_all: bool) -> std::fmt::Result {
    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", "=".repeat(view.title.chars().count()))?;
    writeln!(out)?;
    writeln!(out, "{}", view.situation_analysis)?;

    if !view.phases.is_empty() {
        writeln!(out)?;
        writeln!(out, "Roadmap:")?;
        for phase in &view.phases {
            let open = expand_all || phase.expanded;
            let marker = if open { "v" } else { ">" };
            writeln!(
                out,
                "  {marker} Phase {}: {} ({})",
                phase.index, phase.name, phase.duration
            )?;
            if open {
                for action in &phase.actions {
                    writeln!(out, "      - {action}")?;
                }
            }
        }
    }

    if view.show_pivot_options() {
        writeln!(out)?;
        writeln!(out, "Career pivot options:")?;
        for option in &view.pivot_options {
            writeln!(out, "  * {}", option.role)?;
            writeln!(out, "      {}", option.description)?;
            writeln!(out, "      Pathway: {}", option.pathway)?;
        }
    }

    if !view.institutions.is_empty() {
        writeln!(out)?;
        writeln!(out, "Key institutions:")?;
        for inst in &view.institutions {
            writeln!(out, "  - {}", inst.name)?;
            writeln!(out, "      {}", inst.map_url)?;
        }
    }

    if !view.aid_tips.is_empty() {
        writeln!(out)?;
        writeln!(out, "Financial aid:")?;
        for tip in &view.aid_tips {
            writeln!(out, "  - {tip}")?;
        }
    }

    Ok(())
}

/// Message shown when a payload cannot be displayed.
pub fn unsupported_message(reason: &str) -> String {
    format!("This roadmap format is not supported ({reason}). Start over with a new request.")
}

/// Print a payload. Returns `false` when it was not displayable.
pub fn print_payload(payload: &str, expand_all: bool) -> bool {
    match ResultView::from_payload(payload) {
        ResultView::Rendered(view) => {
            print!("{}", format_view(&view, expand_all));
            true
        }
        ResultView::Unsupported { reason } => {
            eprintln!("{}", unsupported_message(&reason));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "title": "Plan",
        "current_status_analysis": "Good start.",
        "roadmap_steps": [
            {"phase": "One", "duration": "1m", "actions": ["first"]},
            {"phase": "Two", "duration": "2m", "actions": ["second"]}
        ],
        "key_institutions": ["SAI Patiala"],
        "financial_aid_tips": []
    }"#;

    fn view() -> RoadmapView {
        ResultView::from_payload(PAYLOAD).view().cloned().unwrap()
    }

    #[test]
    fn collapsed_phases_hide_actions() {
        let text = format_view(&view(), false);
        assert!(text.contains("  v Phase 1: One (1m)\n      - first\n"));
        assert!(text.contains("  > Phase 2: Two (2m)\n"));
        assert!(!text.contains("- second"));
        assert!(!text.contains("Financial aid:"));
        assert!(!text.contains("Career pivot options:"));
    }

    #[test]
    fn expand_all_shows_every_action() {
        let text = format_view(&view(), true);
        assert!(text.contains("- second"));
    }

    #[test]
    fn institutions_show_map_links() {
        let text = format_view(&view(), false);
        assert!(text.contains("https://www.google.com/maps/search/?api=1&query=SAI%20Patiala"));
    }
}
