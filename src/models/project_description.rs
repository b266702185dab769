use serde::{Deserialize, Serialize};

/// Shown in prompts for fields the user left blank.
pub const EMPTY_FIELD_PLACEHOLDER: &str = "(not specified)";

/// The seven free-text fields submitted from the form.
///
/// Nothing is validated; a missing form key deserializes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescription {
    pub domain: String,
    pub primary_entity: String,
    pub constraints: String,
    pub advanced: String,
    pub security: String,
    pub reporting: String,
    pub tasks: String,
}

/// One labelled field, in form order, as handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectField<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

impl ProjectDescription {
    pub fn fields(&self) -> [ProjectField<'_>; 7] {
        [
            ProjectField { label: "Domain", value: &self.domain },
            ProjectField { label: "Primary Entity Focus", value: &self.primary_entity },
            ProjectField { label: "Constraint/Rule", value: &self.constraints },
            ProjectField { label: "Advanced Feature / Trigger", value: &self.advanced },
            ProjectField { label: "Security / Access Control", value: &self.security },
            ProjectField { label: "Reporting Requirement", value: &self.reporting },
            ProjectField { label: "Common Tasks", value: &self.tasks },
        ]
    }

    /// Fields with blanks replaced by [`EMPTY_FIELD_PLACEHOLDER`].
    pub fn prompt_fields(&self) -> Vec<ProjectField<'_>> {
        self.fields()
            .into_iter()
            .map(|field| ProjectField {
                label: field.label,
                value: if field.value.is_empty() { EMPTY_FIELD_PLACEHOLDER } else { field.value },
            })
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|field| field.value.trim().is_empty())
    }
}
