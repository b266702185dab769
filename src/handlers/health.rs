use actix_web::{web, HttpResponse, Responder};
use serde::{Serialize, Deserialize};

use crate::config::{AppSettings, PipelineMode};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    app: String,
    environment: String,
    version: String,
    model: String,
    pipeline: PipelineMode,
    api_key_configured: bool,
}

/// Liveness plus the completion setup this process started with. The key
/// itself is never echoed.
pub async fn health_check(settings: web::Data<AppSettings>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        app: settings.app.name.clone(),
        environment: settings.app.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: settings.completion.model.clone(),
        pipeline: settings.completion.pipeline,
        api_key_configured: settings.api_keys.openai_api_key.is_some(),
    })
}
