//! Artifact model, parsing, rendering and export.

pub mod export;
pub mod model;
pub mod parser;
pub mod render;
pub mod skills;

pub use export::{to_markdown, export_filename};
pub use model::{Artifact, ERROR_TITLE, Phase, PivotOption};
pub use parser::{ArtifactParseError, parse_artifact, strip_fences};
pub use render::{InstitutionLink, PhaseView, ResultView, RoadmapView, map_search_url};
pub use skills::SkillTranslation;
