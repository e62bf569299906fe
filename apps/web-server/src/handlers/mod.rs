//! HTTP handlers and route configuration.

mod about;
mod auth;
mod context;
mod health;
mod posts;


use actix_web::{HttpRequest, HttpResponse, error, web};
use yatube_shared::ErrorResponse;

use crate::middleware::error::AppError;
use crate::observability::RequestId;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        // `/posts/abc/` is an unknown page, not a malformed request.
        error::InternalError::from_response(
            err,
            HttpResponse::NotFound().json(ErrorResponse::not_found("No such page")),
        )
        .into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    // Feeds and post pages
    .route("/", web::get().to(posts::index))
    .route("/group/{slug}/", web::get().to(posts::group_posts))
    .route("/profile/{username}/", web::get().to(posts::profile))
    .route("/posts/{post_id}/", web::get().to(posts::post_detail))
    .service(
        web::resource("/posts/{post_id}/edit/")
            .route(web::get().to(posts::post_edit_form))
            .route(web::post().to(posts::post_edit)),
    )
    .service(
        web::resource("/create/")
            .route(web::get().to(posts::post_create_form))
            .route(web::post().to(posts::post_create)),
    )
    // Static pages
    .service(
        web::scope("/about")
            .route("/author/", web::get().to(about::author))
            .route("/tech/", web::get().to(about::tech)),
    )
    // Auth
    .service(
        web::scope("/auth")
            .route("/signup/", web::post().to(auth::signup))
            .service(
                web::resource("/login/")
                    .route(web::get().to(auth::login_page))
                    .route(web::post().to(auth::login)),
            )
            .route("/me/", web::get().to(auth::me)),
    )
    .route("/health/", web::get().to(health::health_check))
    .default_service(web::to(not_found));
}

/// Fallback for every unknown path.
async fn not_found(req: HttpRequest, request_id: RequestId) -> HttpResponse {
    tracing::debug!(path = %req.path(), "No route matched");

    HttpResponse::NotFound().json(
        ErrorResponse::not_found(format!("No page at {}", req.path()))
            .with_request_id(request_id.as_str()),
    )
}
