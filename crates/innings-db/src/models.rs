use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which intake journey produced a roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Aspiring athlete building a development path.
    Discovery,
    /// Transitioning athlete looking for a second career.
    Pivot,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Discovery => "discovery",
            Self::Pivot => "pivot",
        };
        f.pad(s)
    }
}

impl FromStr for FlowKind {
    type Err = FlowKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discovery" => Ok(Self::Discovery),
            "pivot" => Ok(Self::Pivot),
            other => Err(FlowKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`FlowKind`] string.
#[derive(Debug, Clone)]
pub struct FlowKindParseError(pub String);

impl fmt::Display for FlowKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid flow: {:?} (expected discovery or pivot)", self.0)
    }
}

impl std::error::Error for FlowKindParseError {}

// ---------------------------------------------------------------------------

/// Catalog category of a starrable opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OpportunityCategory {
    Pension,
    Scholarship,
    Job,
}

impl fmt::Display for OpportunityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pension => "pension",
            Self::Scholarship => "scholarship",
            Self::Job => "job",
        };
        f.pad(s)
    }
}

impl FromStr for OpportunityCategory {
    type Err = OpportunityCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pension" => Ok(Self::Pension),
            "scholarship" => Ok(Self::Scholarship),
            "job" => Ok(Self::Job),
            other => Err(OpportunityCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OpportunityCategory`] string.
#[derive(Debug, Clone)]
pub struct OpportunityCategoryParseError(pub String);

impl fmt::Display for OpportunityCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid opportunity category: {:?} (expected pension, scholarship, or job)",
            self.0
        )
    }
}

impl std::error::Error for OpportunityCategoryParseError {}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A saved roadmap, as stored in the `roadmaps` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Roadmap {
    pub id: i64,
    pub flow: FlowKind,
    pub sport: String,
    pub title: String,
    pub summary: String,
    /// Raw artifact payload exactly as returned by generation.
    pub full_content: String,
    pub created_at: DateTime<Utc>,
}

/// A roadmap that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoadmap {
    pub flow: FlowKind,
    pub sport: String,
    pub title: String,
    pub summary: String,
    pub full_content: String,
    pub created_at: DateTime<Utc>,
}

impl NewRoadmap {
    /// Build a record stamped with the current time.
    pub fn new(
        flow: FlowKind,
        sport: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        full_content: impl Into<String>,
    ) -> Self {
        Self {
            flow,
            sport: sport.into(),
            title: title.into(),
            summary: summary.into(),
            full_content: full_content.into(),
            created_at: Utc::now(),
        }
    }

    /// Name of the first required field that is blank, if any.
    ///
    /// The summary may be empty; everything else must carry text.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.sport.trim().is_empty() {
            Some("sport")
        } else if self.title.trim().is_empty() {
            Some("title")
        } else if self.full_content.trim().is_empty() {
            Some("full_content")
        } else {
            None
        }
    }
}

/// A starred opportunity, as stored in the `opportunities` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StarredOpportunity {
    pub id: String,
    pub category: OpportunityCategory,
    pub title: String,
    pub starred_at: DateTime<Utc>,
}

/// The caller's view of an opportunity when toggling its star.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityRef {
    /// Stable catalog identifier (e.g. `sai-pension`).
    pub id: String,
    pub category: OpportunityCategory,
    /// Display title kept alongside the star.
    pub title: String,
}

impl OpportunityRef {
    pub fn new(
        id: impl Into<String>,
        category: OpportunityCategory,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Sort direction for roadmap listings (by creation time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadmapOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Filter and ordering for roadmap listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoadmapQuery {
    pub flow: Option<FlowKind>,
    pub sport: Option<String>,
    pub order: RoadmapOrder,
}

impl RoadmapQuery {
    /// Every roadmap, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_flow(mut self, flow: FlowKind) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.order = RoadmapOrder::OldestFirst;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_kind_round_trip() {
        for flow in [FlowKind::Discovery, FlowKind::Pivot] {
            assert_eq!(flow.to_string().parse::<FlowKind>().unwrap(), flow);
        }
        assert!("second-innings".parse::<FlowKind>().is_err());
    }

    #[test]
    fn category_parse_rejects_unknown() {
        assert_eq!(
            "scholarship".parse::<OpportunityCategory>().unwrap(),
            OpportunityCategory::Scholarship
        );
        let err = "grant".parse::<OpportunityCategory>().unwrap_err();
        assert!(err.to_string().contains("grant"));
    }

    #[test]
    fn missing_field_reports_first_blank() {
        let mut record = NewRoadmap::new(FlowKind::Pivot, "Cricket", "Plan", "", "{}");
        assert_eq!(record.missing_field(), None);

        record.title = "   ".to_string();
        assert_eq!(record.missing_field(), Some("title"));

        record.sport = String::new();
        assert_eq!(record.missing_field(), Some("sport"));
    }

    #[test]
    fn query_builder_defaults_to_newest_first() {
        let q = RoadmapQuery::all()
            .with_flow(FlowKind::Discovery)
            .with_sport("Hockey");
        assert_eq!(q.order, RoadmapOrder::NewestFirst);
        assert_eq!(q.flow, Some(FlowKind::Discovery));
        assert_eq!(q.sport.as_deref(), Some("Hockey"));
        assert_eq!(q.oldest_first().order, RoadmapOrder::OldestFirst);
    }
}
