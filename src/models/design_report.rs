use chrono::{DateTime, Utc};
use serde::Serialize;

/// A methodology stage that gets its own prompt and its own fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Every stage in one prompt (single-call layout).
    Combined,
    /// Business rules, table definitions, missing rules and normalization.
    Analysis,
    /// Entity-relationship diagram.
    Diagram,
    /// SQL statement generation.
    Sql,
}

/// How the results page embeds a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Html,
    Diagram,
}

impl Stage {
    pub fn title(self) -> &'static str {
        match self {
            Stage::Combined => "Database Design Report",
            Stage::Analysis => "Business Rules, Tables and Normalization",
            Stage::Diagram => "Entity-Relationship Diagram",
            Stage::Sql => "SQL Code",
        }
    }

    pub fn kind(self) -> FragmentKind {
        match self {
            Stage::Diagram => FragmentKind::Diagram,
            _ => FragmentKind::Html,
        }
    }

    pub fn prompt_template(self) -> &'static str {
        match self {
            Stage::Combined => "prompts/combined.tera",
            Stage::Analysis => "prompts/analysis.tera",
            Stage::Diagram => "prompts/diagram.tera",
            Stage::Sql => "prompts/sql.tera",
        }
    }
}

/// Sanitized model output for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub stage: Stage,
    pub title: &'static str,
    pub kind: FragmentKind,
    pub content: String,
}

impl Fragment {
    pub fn new(stage: Stage, content: String) -> Self {
        Self {
            stage,
            title: stage.title(),
            kind: stage.kind(),
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub fragments: Vec<Fragment>,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
