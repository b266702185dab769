use tera::{Context, Tera};

use crate::config::PipelineMode;
use crate::error::AppError;
use crate::models::{ProjectDescription, Stage};

const PROMPT_TEMPLATES: [(&str, &str); 5] = [
    ("prompts/description.tera", include_str!("../../templates/prompts/description.tera")),
    ("prompts/combined.tera", include_str!("../../templates/prompts/combined.tera")),
    ("prompts/analysis.tera", include_str!("../../templates/prompts/analysis.tera")),
    ("prompts/diagram.tera", include_str!("../../templates/prompts/diagram.tera")),
    ("prompts/sql.tera", include_str!("../../templates/prompts/sql.tera")),
];

const STAGED_ORDER: [Stage; 3] = [Stage::Analysis, Stage::Diagram, Stage::Sql];

/// A rendered prompt and the stage its answer fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub stage: Stage,
    pub text: String,
}

/// Renders the fixed instruction templates for a project description.
///
/// Prompt templates are not `.html`, so tera does not escape field values:
/// whatever the user typed reaches the model verbatim.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(PROMPT_TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn stages(mode: PipelineMode) -> &'static [Stage] {
        match mode {
            PipelineMode::Staged => &STAGED_ORDER,
            PipelineMode::Combined => &[Stage::Combined],
        }
    }

    pub fn build(
        &self,
        mode: PipelineMode,
        description: &ProjectDescription,
    ) -> Result<Vec<PromptRequest>, AppError> {
        let mut context = Context::new();
        context.insert("fields", &description.prompt_fields());

        Self::stages(mode)
            .iter()
            .map(|&stage| -> Result<PromptRequest, AppError> {
                let text = self.tera.render(stage.prompt_template(), &context)?;
                Ok(PromptRequest { stage, text })
            })
            .collect()
    }
}
