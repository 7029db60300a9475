pub mod handlers;

use axum::{Router, routing::get};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/admin/stats", get(handlers::get_stats_handler))
}
