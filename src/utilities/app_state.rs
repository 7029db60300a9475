use crate::{
    features::search::executor::SearchExecutor, services::database::Database,
    utilities::config::Config,
};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    pub search: SearchExecutor,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SearchExecutor {
    fn from_ref(state: &AppState) -> Self {
        state.search.clone()
    }
}
