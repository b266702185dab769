use std::env;
use std::str::FromStr;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub api_keys: ApiKeysConfig,
    pub completion: CompletionConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    pub openai_api_key: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub pipeline: PipelineMode,
    pub timeout_secs: Option<u64>,
}

/// Which prompt layout the design pipeline sends to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Three sequential prompts: analysis, diagram, SQL.
    Staged,
    /// One prompt covering every stage.
    Combined,
}

impl FromStr for PipelineMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staged" => Ok(PipelineMode::Staged),
            "combined" => Ok(PipelineMode::Combined),
            other => Err(AppError::Configuration(format!(
                "PROMPT_PIPELINE must be 'staged' or 'combined', got '{}'",
                other
            ))),
        }
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        // App config
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "dbdesign-assistant".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Server config
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::Configuration("SERVER_PORT must be a valid port number".to_string()))?;

        // A missing key is reported by the first completion call, not here
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        // Completion config
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let pipeline = env::var("PROMPT_PIPELINE")
            .unwrap_or_else(|_| "staged".to_string())
            .parse::<PipelineMode>()?;
        // Blank is treated as unset, same as the API key
        let timeout_secs = match env::var("COMPLETION_TIMEOUT_SECS")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
        {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::Configuration("COMPLETION_TIMEOUT_SECS must be a valid number".to_string())
            })?),
            None => None,
        };

        Ok(Self {
            app: AppConfig {
                name: app_name,
                environment,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            api_keys: ApiKeysConfig { openai_api_key },
            completion: CompletionConfig {
                base_url,
                model,
                pipeline,
                timeout_secs,
            },
        })
    }

    /// Settings for tests and local tooling; never reads the environment.
    pub fn for_base_url(base_url: &str, api_key: Option<&str>, pipeline: PipelineMode) -> Self {
        Self {
            app: AppConfig {
                name: "dbdesign-assistant".to_string(),
                environment: "test".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            api_keys: ApiKeysConfig {
                openai_api_key: api_key.map(str::to_string),
            },
            completion: CompletionConfig {
                base_url: base_url.to_string(),
                model: DEFAULT_MODEL.to_string(),
                pipeline,
                timeout_secs: None,
            },
        }
    }
}
