use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    features::search::{
        executor::SearchExecutor,
        schemas::{SearchQuery, SearchResponse},
        session::{SearchSessionState, SearchStatus},
        view::render,
    },
    utilities::errors::AppError,
};

pub async fn search_rentals_handler(
    State(search): State<SearchExecutor>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = query.criteria();
    let page = query.page();

    let result = search.execute(&criteria, page).await?;

    let view = render(&SearchSessionState {
        criteria: criteria.clone(),
        page,
        status: SearchStatus::Loaded,
        last_result: Some(result.clone()),
    });

    Ok(Json(SearchResponse {
        criteria,
        result,
        view,
    }))
}
