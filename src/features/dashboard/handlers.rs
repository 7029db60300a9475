use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::{services::database::Database, utilities::errors::AppError};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_experiences: i64,
    pub active_offers: i64,
    pub total_rentals: i64,
    pub available_rentals: i64,
}

pub async fn get_stats_handler(
    State(database): State<Database>,
) -> Result<impl IntoResponse, AppError> {
    let total_experiences = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM experiences")
        .fetch_one(&database.pool)
        .await?;

    let active_offers =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers WHERE status = 'active'")
            .fetch_one(&database.pool)
            .await?;

    let (total_rentals, available_rentals) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE status = 'available')
        FROM rentals
        "#,
    )
    .fetch_one(&database.pool)
    .await?;

    Ok(Json(StatsResponse {
        total_experiences,
        active_offers,
        total_rentals,
        available_rentals,
    }))
}
