//! Landing page and health check.

use actix_web::{HttpResponse, web};
use forum_shared::ApiResponse;
use serde::Serialize;

use crate::handlers::redirect;
use crate::middleware::auth::OptionalIdentity;
use crate::state::AppState;

/// GET / - anonymous landing page; logged-in users go straight to the feed.
pub async fn landing(identity: OptionalIdentity) -> HttpResponse {
    if identity.0.is_some() {
        return redirect("/main");
    }

    HttpResponse::Ok().json(ApiResponse::notice(
        "Welcome to the forum. Log in or register to participate.",
    ))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(_state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
