pub mod structs;
pub mod client;

pub use structs::*;
pub use client::{CompletionError, OpenAIClient};
