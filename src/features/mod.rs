pub mod dashboard;
pub mod experiences;
pub mod offers;
pub mod rentals;
pub mod schemas;
pub mod search;

use axum::Router;

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(search::routes())
        .merge(rentals::routes())
        .merge(experiences::routes())
        .merge(offers::routes())
        .merge(dashboard::routes())
}
