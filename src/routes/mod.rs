//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API for templates and campaigns plus the
//! public, read-only campaign view under a single Axum router. Scenes and
//! SVG pages are rendered server-side with the `canvas` crate, the same
//! code the browser editor runs as WebAssembly.

pub mod campaigns;
pub mod templates;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::ServiceError;
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/templates", get(templates::list_templates).post(templates::create_template))
        .route("/api/templates/{id}", get(templates::get_template))
        .route("/api/templates/{id}/cover-page", put(templates::save_cover_page))
        .route("/api/campaigns", get(campaigns::list_campaigns).post(campaigns::create_campaign))
        .route("/api/campaigns/{id}", get(campaigns::get_campaign))
        .route("/api/campaigns/{id}/canvas", put(campaigns::save_canvas))
        .route("/api/campaigns/{id}/view", get(campaigns::view_scene))
        .route("/api/campaigns/{id}/view.svg", get(campaigns::view_svg))
        .route("/api/campaigns/{id}/thumbnail.svg", get(campaigns::thumbnail_svg))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub(crate) fn service_error_to_status(err: ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ServiceError::Database(e) => {
            tracing::error!(error = %e, "database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
