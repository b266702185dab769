use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

use crate::clients::CompletionProvider;
use crate::config::PipelineMode;
use crate::error::{AppError, AppResult};
use crate::models::{DesignReport, Fragment, ProjectDescription};
use crate::services::prompt_builder::PromptBuilder;
use crate::utils::fence_sanitizer::strip_code_fences;

/// Turns a project description into sanitized design fragments.
///
/// Prompts are sent one after another. The first failed call ends the run
/// and fragments gathered so far are dropped.
pub struct DesignPipeline {
    provider: Arc<dyn CompletionProvider>,
    prompts: PromptBuilder,
    mode: PipelineMode,
}

impl DesignPipeline {
    pub fn new(provider: Arc<dyn CompletionProvider>, mode: PipelineMode) -> AppResult<Self> {
        Ok(Self {
            provider,
            prompts: PromptBuilder::new()?,
            mode,
        })
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    pub async fn run(
        &self,
        request_id: &str,
        description: &ProjectDescription,
    ) -> AppResult<DesignReport> {
        let prompts = self.prompts.build(self.mode, description)?;
        let total = prompts.len();
        let mut fragments = Vec::with_capacity(total);

        for (index, prompt) in prompts.into_iter().enumerate() {
            info!(
                "[{}] Requesting {:?} stage ({}/{}), prompt length {}",
                request_id,
                prompt.stage,
                index + 1,
                total,
                prompt.text.len()
            );

            let raw = self.provider.complete(&prompt.text).await.map_err(|e| {
                error!("[{}] {:?} stage failed: {}", request_id, prompt.stage, e);
                AppError::from(e)
            })?;

            fragments.push(Fragment::new(prompt.stage, strip_code_fences(&raw)));
        }

        Ok(DesignReport {
            fragments,
            model: self.provider.model().to_string(),
            generated_at: Utc::now(),
        })
    }
}
