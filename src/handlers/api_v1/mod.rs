pub mod navigation;
pub mod pages;
pub mod types;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::errors::ApiErrorResponse;

/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// GET requests are exempt (read-only, no state changes).
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
                details: None,
            };
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/navigation", web::get().to(navigation::index));
    cfg.service(
        web::scope("/pages")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(pages::index))
            .route("/{page_id}/records", web::get().to(pages::list_records))
            .route("/{page_id}/records", web::post().to(pages::create_record))
            .route("/{page_id}/records/{record_id}", web::get().to(pages::read_record))
            .route("/{page_id}/records/{record_id}", web::put().to(pages::update_record))
            .route("/{page_id}/records/{record_id}", web::delete().to(pages::delete_record))
    );
}
