pub mod features;
pub mod services;
pub mod utilities;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::utilities::{app_state::AppState, errors::AppError};

/// Builds the full HTTP router: every feature's routes behind CORS for the
/// configured frontend and request tracing.
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_endpoint.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(features::routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
