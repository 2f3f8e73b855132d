//! Route definitions for the labdash API.

pub mod dashboard;
pub mod health;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.frontend_url) {
        Ok(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!(
                url = %state.config.frontend_url,
                "Invalid FRONTEND_URL; CORS origin not set"
            );
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/dashboard", get(dashboard::layout))
        .route("/dashboard/stats", get(dashboard::stats));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
