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
        .route(
            "/api/v1/experiences",
            get(handlers::get_many_experiences_handler),
        )
        .route(
            "/api/v1/experiences",
            post(handlers::create_experience_handler),
        )
        .route(
            "/api/v1/experiences/{experience_id}",
            get(handlers::get_one_experience_handler),
        )
        .route(
            "/api/v1/experiences/{experience_id}",
            patch(handlers::update_experience_handler),
        )
        .route(
            "/api/v1/experiences/{experience_id}",
            delete(handlers::delete_experience_handler),
        )
}
