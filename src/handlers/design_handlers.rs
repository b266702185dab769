use actix_web::{web, HttpResponse};
use log::{error, info, warn};
use tera::Tera;
use uuid::Uuid;

use crate::config::AppSettings;
use crate::error::AppError;
use crate::models::ProjectDescription;
use crate::services::page_renderer::{render_form, render_results};
use crate::services::DesignPipeline;

// Serve the submission form
pub async fn index(
    tera: web::Data<Tera>,
    settings: web::Data<AppSettings>,
) -> Result<HttpResponse, AppError> {
    let rendered = render_form(&tera, &settings.app.name)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}

/// Runs the design pipeline for a submitted form.
///
/// Pipeline failures are rendered as an inline alert on the results page;
/// only a template failure becomes an error response.
pub async fn generate(
    form: web::Form<ProjectDescription>,
    pipeline: web::Data<DesignPipeline>,
    tera: web::Data<Tera>,
    settings: web::Data<AppSettings>,
) -> Result<HttpResponse, AppError> {
    let description = form.into_inner();
    let request_id = Uuid::new_v4().to_string();

    info!(
        "[{}] Design request for domain '{}' ({:?} pipeline)",
        request_id,
        description.domain,
        pipeline.mode()
    );
    if description.is_blank() {
        warn!("[{}] Every form field is empty; prompts carry placeholders only", request_id);
    }

    let outcome = pipeline.run(&request_id, &description).await;
    match &outcome {
        Ok(report) => info!(
            "[{}] Design generated with {} fragment(s)",
            request_id,
            report.fragments.len()
        ),
        Err(e) => error!("[{}] Design generation failed: {}", request_id, e),
    }

    let rendered = render_results(&tera, &settings.app.name, &description, &outcome)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}
