//! Database Design Assistant server library
//!
//! Serves a project-description form, sends the description to a
//! chat-completion API as staged database-design prompts and renders the
//! sanitized answers as HTML.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::AppError;
