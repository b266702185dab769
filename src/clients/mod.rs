pub mod openai;

use async_trait::async_trait;

pub use openai::{CompletionError, OpenAIClient};

/// A chat-completion backend that turns one prompt into one block of text.
///
/// Handlers receive this behind an `Arc<dyn CompletionProvider>` so tests can
/// swap in a scripted provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;
}

#[cfg(test)]
pub mod scripted;
