use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    features::{
        experiences::{
            repository::{
                create_experience, delete_experience, get_many_experiences, get_one_experience,
                update_experience,
            },
            schemas::{ExperienceIn, ExperiencePatch},
        },
        schemas::{AdminListQuery, ListResponse},
    },
    services::database::Database,
    utilities::errors::AppError,
};

pub async fn get_many_experiences_handler(
    State(database): State<Database>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.pagination.validate()?;

    let (data, total) = get_many_experiences(&database.pool, &query).await?;

    Ok(Json(ListResponse { data, total }))
}

pub async fn get_one_experience_handler(
    State(database): State<Database>,
    Path(experience_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let experience = get_one_experience(&database.pool, &experience_id).await?;

    Ok(Json(experience))
}

pub async fn create_experience_handler(
    State(database): State<Database>,
    Json(experience): Json<ExperienceIn>,
) -> Result<impl IntoResponse, AppError> {
    experience.check()?;

    let created = create_experience(&database.pool, &experience).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_experience_handler(
    State(database): State<Database>,
    Path(experience_id): Path<Uuid>,
    Json(patch): Json<ExperiencePatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.check()?;

    let updated = update_experience(&database.pool, &experience_id, &patch).await?;

    Ok(Json(updated))
}

pub async fn delete_experience_handler(
    State(database): State<Database>,
    Path(experience_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    delete_experience(&database.pool, &experience_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
