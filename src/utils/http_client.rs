use reqwest::Client;
use std::time::Duration;

use crate::error::AppError;

/// Builds the client used for completion calls.
///
/// reqwest defaults apply throughout; an overall request timeout is set only
/// when `COMPLETION_TIMEOUT_SECS` is configured.
pub fn new_api_client(timeout_secs: Option<u64>) -> Result<Client, AppError> {
    let mut builder = Client::builder();

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))
}
