//! View model for displaying an artifact.

use super::model::{Artifact, PivotOption};
use super::parser::{ArtifactParseError, parse_artifact};

const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Map-search link for a free-text place name. The name is passed through
/// as the search term without any validation.
pub fn map_search_url(query: &str) -> String {
    format!("{MAP_SEARCH_BASE}{}", urlencoding::encode(query))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseView {
    /// 1-based position in the roadmap.
    pub index: usize,
    pub name: String,
    pub duration: String,
    pub actions: Vec<String>,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionLink {
    pub name: String,
    pub map_url: String,
}

impl InstitutionLink {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let map_url = map_search_url(&name);
        Self { name, map_url }
    }
}

/// Everything a front end needs to show one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapView {
    pub title: String,
    pub situation_analysis: String,
    pub phases: Vec<PhaseView>,
    pub pivot_options: Vec<PivotOption>,
    pub institutions: Vec<InstitutionLink>,
    pub aid_tips: Vec<String>,
    /// Set when the artifact is the degraded failure payload.
    pub is_error: bool,
}

impl RoadmapView {
    /// Build the view; only the first phase starts expanded.
    pub fn new(artifact: &Artifact) -> Self {
        let phases = artifact
            .phases
            .iter()
            .enumerate()
            .map(|(i, phase)| PhaseView {
                index: i + 1,
                name: phase.name.clone(),
                duration: phase.duration.clone(),
                actions: phase.actions.clone(),
                expanded: i == 0,
            })
            .collect();

        Self {
            title: artifact.title.clone(),
            situation_analysis: artifact.situation_analysis.clone(),
            phases,
            pivot_options: artifact.pivot_options().to_vec(),
            institutions: artifact
                .institutions
                .iter()
                .map(|name| InstitutionLink::new(name.as_str()))
                .collect(),
            aid_tips: artifact.aid_tips.clone(),
            is_error: artifact.is_error(),
        }
    }

    pub fn show_pivot_options(&self) -> bool {
        !self.pivot_options.is_empty()
    }

    /// Flip one phase open or closed. Returns the new state, or `None` for
    /// an index past the end. Other phases are untouched.
    pub fn toggle_phase(&mut self, position: usize) -> Option<bool> {
        let phase = self.phases.get_mut(position)?;
        phase.expanded = !phase.expanded;
        Some(phase.expanded)
    }

    pub fn expanded_count(&self) -> usize {
        self.phases.iter().filter(|p| p.expanded).count()
    }
}

/// Outcome of preparing a payload for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Rendered(RoadmapView),
    /// The payload could not be parsed; the only action offered is reset.
    Unsupported { reason: String },
}

impl ResultView {
    pub fn from_payload(text: &str) -> Self {
        match parse_artifact(text) {
            Ok(artifact) => Self::Rendered(RoadmapView::new(&artifact)),
            Err(err) => Self::unsupported(&err),
        }
    }

    fn unsupported(err: &ArtifactParseError) -> Self {
        Self::Unsupported {
            reason: err.to_string(),
        }
    }

    pub fn view(&self) -> Option<&RoadmapView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::Unsupported { .. } => None,
        }
    }
}
