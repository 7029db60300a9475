pub mod handlers;
pub mod models;
pub mod repository;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/rentals", get(handlers::get_many_rentals_handler))
        .route("/api/v1/rentals", post(handlers::create_rental_handler))
        .route(
            "/api/v1/rentals/{rental_id}",
            get(handlers::get_one_rental_handler),
        )
        .route(
            "/api/v1/rentals/{rental_id}",
            patch(handlers::update_rental_handler),
        )
        .route(
            "/api/v1/rentals/{rental_id}",
            delete(handlers::delete_rental_handler),
        )
}
