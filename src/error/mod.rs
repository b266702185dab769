use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::error::Error as StdError;

use crate::clients::openai::CompletionError;

#[derive(Debug)]
pub enum AppError {
    Internal(String),
    Auth(String),
    Configuration(String),
    External(String),
    Serialization(String),
    TooManyRequests(String),
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    code: u16,
    message: String,
    error_type: String,
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::Auth(_) => (StatusCode::UNAUTHORIZED, "authentication_error"),
            AppError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            AppError::External(_) => (StatusCode::BAD_GATEWAY, "external_service_error"),
            AppError::Serialization(_) => (StatusCode::BAD_GATEWAY, "serialization_error"),
            AppError::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, "too_many_requests"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::Auth(e) => write!(f, "Authentication error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::External(e) => write!(f, "External service error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AppError::TooManyRequests(e) => write!(f, "Too many requests: {}", e),
        }
    }
}

impl StdError for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_type) = self.status_and_type();

        let error_response = ErrorResponse {
            code: status_code.as_u16(),
            message: self.to_string(),
            error_type: error_type.to_string(),
        };

        HttpResponse::build(status_code).json(error_response)
    }

    fn status_code(&self) -> StatusCode {
        self.status_and_type().0
    }
}

impl From<CompletionError> for AppError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::MissingApiKey => {
                AppError::Auth("OPENAI_API_KEY is not set".to_string())
            }
            CompletionError::Unauthorized(msg) => AppError::Auth(msg),
            CompletionError::RateLimited(msg) => AppError::TooManyRequests(msg),
            CompletionError::Transport(e) => {
                AppError::External(format!("Completion request failed: {}", e))
            }
            CompletionError::Api { status, message } => AppError::External(format!(
                "Completion API returned status {}: {}",
                status, message
            )),
            CompletionError::MalformedResponse(msg) => AppError::Serialization(msg),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(error: tera::Error) -> Self {
        // tera nests the useful message in the source chain
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        AppError::Internal(format!("Template error: {}", message))
    }
}

// Define AppResult type alias for Result<T, AppError>
pub type AppResult<T> = Result<T, AppError>;
