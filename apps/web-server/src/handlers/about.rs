//! Static informational pages.

use actix_web::HttpResponse;
use yatube_shared::dto::StaticPageResponse;

fn page(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok().json(StaticPageResponse {
        title: title.to_string(),
        body: body.to_string(),
    })
}

/// GET /about/author/
pub async fn author() -> HttpResponse {
    page(
        "About the author",
        "Yatube is a small community blog: people publish short posts, \
         optionally inside thematic groups, and read each other's feeds.",
    )
}

/// GET /about/tech/
pub async fn tech() -> HttpResponse {
    page(
        "Technologies",
        "Rust, actix-web, SeaORM over PostgreSQL, JWT bearer authentication \
         and structured logging with tracing.",
    )
}
