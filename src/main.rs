use actix_web::{web, App, HttpServer, middleware::Logger};
use dotenv::dotenv;
use std::net::TcpListener;
use std::sync::Arc;

use dbdesign_server::clients::{CompletionProvider, OpenAIClient};
use dbdesign_server::config;
use dbdesign_server::routes::configure_routes;
use dbdesign_server::services::DesignPipeline;
use dbdesign_server::services::page_renderer::load_page_templates;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings
    let app_settings = match config::init_config() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start server without valid settings");
            std::process::exit(1);
        }
    };

    if app_settings.api_keys.openai_api_key.is_none() {
        log::warn!("OPENAI_API_KEY is not set; design requests will fail until it is provided");
    }

    let completion_client: Arc<dyn CompletionProvider> = match OpenAIClient::new(&app_settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("Failed to initialize completion client: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = match DesignPipeline::new(completion_client, app_settings.completion.pipeline) {
        Ok(pipeline) => web::Data::new(pipeline),
        Err(e) => {
            log::error!("Failed to initialize design pipeline: {}", e);
            std::process::exit(1);
        }
    };

    let templates = match load_page_templates() {
        Ok(tera) => web::Data::new(tera),
        Err(e) => {
            log::error!("Failed to load page templates: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Using model {} with {:?} pipeline",
        app_settings.completion.model,
        app_settings.completion.pipeline
    );

    // Get server host and port from settings
    let host = &app_settings.server.host;
    let port = app_settings.server.port;

    log::info!("Starting {} ({}) at http://{}:{}", app_settings.app.name, app_settings.app.environment, host, port);

    let listener = TcpListener::bind(format!("{}:{}", host, port))?;
    let settings = web::Data::new(app_settings.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(settings.clone())
            .app_data(pipeline.clone())
            .app_data(templates.clone())
            .configure(configure_routes)
    })
    .listen(listener)?
    .run()
    .await
}
