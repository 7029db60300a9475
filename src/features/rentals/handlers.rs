use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    features::{
        rentals::{
            repository::{
                create_rental, delete_rental, get_many_rentals, get_one_rental, update_rental,
            },
            schemas::{RentalIn, RentalPatch},
        },
        schemas::{AdminListQuery, ListResponse},
    },
    services::database::Database,
    utilities::errors::AppError,
};

pub async fn get_many_rentals_handler(
    State(database): State<Database>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.pagination.validate()?;

    let (data, total) = get_many_rentals(&database.pool, &query).await?;

    Ok(Json(ListResponse { data, total }))
}

pub async fn get_one_rental_handler(
    State(database): State<Database>,
    Path(rental_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rental = get_one_rental(&database.pool, &rental_id).await?;

    Ok(Json(rental))
}

pub async fn create_rental_handler(
    State(database): State<Database>,
    Json(rental): Json<RentalIn>,
) -> Result<impl IntoResponse, AppError> {
    rental.check()?;

    let created = create_rental(&database.pool, &rental).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_rental_handler(
    State(database): State<Database>,
    Path(rental_id): Path<Uuid>,
    Json(patch): Json<RentalPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.check()?;

    let updated = update_rental(&database.pool, &rental_id, &patch).await?;

    Ok(Json(updated))
}

pub async fn delete_rental_handler(
    State(database): State<Database>,
    Path(rental_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    delete_rental(&database.pool, &rental_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
