pub mod compiler;
pub mod executor;
pub mod filter;
pub mod handlers;
pub mod memory;
pub mod page;
pub mod repository;
pub mod schemas;
pub mod session;
pub mod store;
pub mod view;

use axum::{Router, routing::get};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/rentals/search",
        get(handlers::search_rentals_handler),
    )
}
