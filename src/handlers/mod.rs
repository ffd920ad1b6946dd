pub mod api_v1;

use actix_web::{web, HttpResponse};

use crate::errors::ApiErrorResponse;

/// Mount every route under its prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(api_v1::configure));
}

/// Default 404 handler (must be registered last).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse {
        error: "Not found".to_string(),
        details: None,
    })
}
