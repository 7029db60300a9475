use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    features::{
        offers::{
            repository::{create_offer, delete_offer, get_many_offers, get_one_offer, update_offer},
            schemas::{OfferIn, OfferPatch},
        },
        schemas::{AdminListQuery, ListResponse},
    },
    services::database::Database,
    utilities::errors::AppError,
};

pub async fn get_many_offers_handler(
    State(database): State<Database>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.pagination.validate()?;

    let (data, total) = get_many_offers(&database.pool, &query).await?;

    Ok(Json(ListResponse { data, total }))
}

pub async fn get_one_offer_handler(
    State(database): State<Database>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let offer = get_one_offer(&database.pool, &offer_id).await?;

    Ok(Json(offer))
}

pub async fn create_offer_handler(
    State(database): State<Database>,
    Json(offer): Json<OfferIn>,
) -> Result<impl IntoResponse, AppError> {
    offer.check()?;

    let created = create_offer(&database.pool, &offer).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_offer_handler(
    State(database): State<Database>,
    Path(offer_id): Path<Uuid>,
    Json(patch): Json<OfferPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.check()?;

    let updated = update_offer(&database.pool, &offer_id, &patch).await?;

    Ok(Json(updated))
}

pub async fn delete_offer_handler(
    State(database): State<Database>,
    Path(offer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    delete_offer(&database.pool, &offer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
