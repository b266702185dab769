pub mod design_pipeline;
pub mod page_renderer;
pub mod prompt_builder;

pub use design_pipeline::DesignPipeline;
pub use prompt_builder::{PromptBuilder, PromptRequest};
