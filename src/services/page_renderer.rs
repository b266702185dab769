use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{AppError, AppResult};
use crate::models::{DesignReport, Fragment, ProjectDescription, ProjectField};

const PAGE_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("results.html", include_str!("../../templates/results.html")),
];

/// Loads the form and results pages. `.html` templates autoescape; fragments
/// are marked `safe` inside `results.html`.
pub fn load_page_templates() -> AppResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(PAGE_TEMPLATES)?;
    Ok(tera)
}

pub fn render_form(tera: &Tera, app_name: &str) -> AppResult<String> {
    let mut context = Context::new();
    context.insert("app_name", app_name);
    Ok(tera.render("index.html", &context)?)
}

#[derive(Serialize)]
struct ResultsView<'a> {
    app_name: &'a str,
    project: Vec<ProjectField<'a>>,
    fragments: &'a [Fragment],
    error_html: Option<String>,
    model: Option<&'a str>,
    generated_at: Option<String>,
}

/// Renders the results page for a finished run, or the inline error block
/// when the run failed. Both shapes go back to the browser as a normal page.
pub fn render_results(
    tera: &Tera,
    app_name: &str,
    description: &ProjectDescription,
    outcome: &Result<DesignReport, AppError>,
) -> AppResult<String> {
    let view = match outcome {
        Ok(report) => ResultsView {
            app_name,
            project: description.fields().to_vec(),
            fragments: &report.fragments,
            error_html: None,
            model: Some(report.model.as_str()),
            generated_at: Some(report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        },
        Err(error) => ResultsView {
            app_name,
            project: description.fields().to_vec(),
            fragments: &[],
            error_html: Some(error_fragment(error)),
            model: None,
            generated_at: None,
        },
    };

    let context = Context::from_serialize(&view)?;
    Ok(tera.render("results.html", &context)?)
}

/// Inline alert shown in place of the fragments.
pub fn error_fragment(error: &AppError) -> String {
    format!(
        "<div class='alert alert-danger'>An error occurred: {}</div>",
        tera::escape_html(&error.to_string())
    )
}
