//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// GET /health/
///
/// Reports `503` when the database is configured but does not answer.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (healthy, storage) = storage_status(&state).await;

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn storage_status(state: &AppState) -> (bool, &'static str) {
    match &state.db {
        Some(db) => match db.ping().await {
            Ok(()) => (true, "postgres"),
            Err(e) => {
                tracing::error!(error = %e, "Database ping failed");
                (false, "postgres")
            }
        },
        None => (true, "memory"),
    }
}

#[cfg(not(feature = "postgres"))]
async fn storage_status(_state: &AppState) -> (bool, &'static str) {
    (true, "memory")
}
