use actix_web::web;
use crate::handlers::{design_handlers, health};

// Form, generation and health routes; the app has no protected scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(design_handlers::index));
    cfg.route("/generate", web::post().to(design_handlers::generate));
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health::health_check))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_generate_requires_post() {
        let app = test::init_service(App::new().configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/generate").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_client_error());
    }
}
