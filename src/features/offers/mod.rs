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
        .route("/api/v1/offers", get(handlers::get_many_offers_handler))
        .route("/api/v1/offers", post(handlers::create_offer_handler))
        .route(
            "/api/v1/offers/{offer_id}",
            get(handlers::get_one_offer_handler),
        )
        .route(
            "/api/v1/offers/{offer_id}",
            patch(handlers::update_offer_handler),
        )
        .route(
            "/api/v1/offers/{offer_id}",
            delete(handlers::delete_offer_handler),
        )
}
