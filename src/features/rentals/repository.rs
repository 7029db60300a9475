use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::{
    features::{
        rentals::{
            models::{RENTAL_COLUMNS, Rental},
            schemas::{RentalIn, RentalPatch},
        },
        schemas::{AdminListQuery, contains_pattern},
    },
    utilities::errors::AppError,
};

fn push_term_filter(qb: &mut QueryBuilder<'_, Postgres>, term: Option<&str>) {
    if let Some(term) = term {
        let pattern = contains_pattern(term);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR location ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn get_many_rentals(
    pool: &PgPool,
    query: &AdminListQuery,
) -> Result<(Vec<Rental>, i64), AppError> {
    let term = query.term();

    let mut rentals_qb = QueryBuilder::<Postgres>::new("SELECT ");
    rentals_qb.push(RENTAL_COLUMNS).push(" FROM rentals WHERE 1=1");
    push_term_filter(&mut rentals_qb, term);
    rentals_qb.push(" ORDER BY created_at DESC");
    rentals_qb
        .push(" OFFSET ")
        .push_bind(query.pagination.offset);
    rentals_qb.push(" LIMIT ").push_bind(query.pagination.limit);

    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM rentals WHERE 1=1");
    push_term_filter(&mut count_qb, term);

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let rentals = rentals_qb
        .build_query_as::<Rental>()
        .fetch_all(pool)
        .await?;

    debug!("fetched {} of {} rentals", rentals.len(), total);

    Ok((rentals, total))
}

pub async fn get_one_rental(pool: &PgPool, rental_id: &Uuid) -> Result<Rental, AppError> {
    let sql = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1");

    sqlx::query_as::<_, Rental>(&sql)
        .bind(rental_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Rental {rental_id} not found")))
}

pub async fn create_rental(pool: &PgPool, rental: &RentalIn) -> Result<Rental, AppError> {
    let sql = format!(
        r#"
        INSERT INTO rentals
            (title, description, location, price_per_night, capacity, amenities, image_url, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {RENTAL_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Rental>(&sql)
        .bind(&rental.title)
        .bind(&rental.description)
        .bind(&rental.location)
        .bind(&rental.price_per_night)
        .bind(rental.capacity)
        .bind(&rental.amenities)
        .bind(&rental.image_url)
        .bind(rental.status)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

pub async fn update_rental(
    pool: &PgPool,
    rental_id: &Uuid,
    patch: &RentalPatch,
) -> Result<Rental, AppError> {
    if patch.is_empty() {
        return get_one_rental(pool, rental_id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE rentals SET ");
    let mut set = qb.separated(", ");
    if let Some(title) = &patch.title {
        set.push("title = ").push_bind_unseparated(title.clone());
    }
    if let Some(description) = &patch.description {
        set.push("description = ")
            .push_bind_unseparated(description.clone());
    }
    if let Some(location) = &patch.location {
        set.push("location = ").push_bind_unseparated(location.clone());
    }
    if let Some(price) = &patch.price_per_night {
        set.push("price_per_night = ")
            .push_bind_unseparated(price.clone());
    }
    if let Some(capacity) = patch.capacity {
        set.push("capacity = ").push_bind_unseparated(capacity);
    }
    if let Some(amenities) = &patch.amenities {
        set.push("amenities = ")
            .push_bind_unseparated(amenities.clone());
    }
    if let Some(image_url) = &patch.image_url {
        set.push("image_url = ").push_bind_unseparated(image_url.clone());
    }
    if let Some(status) = patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    set.push("updated_at = now()");

    qb.push(" WHERE id = ")
        .push_bind(*rental_id)
        .push(" RETURNING ")
        .push(RENTAL_COLUMNS);

    qb.build_query_as::<Rental>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Rental {rental_id} not found")))
}

pub async fn delete_rental(pool: &PgPool, rental_id: &Uuid) -> Result<(), AppError> {
    let query_result = sqlx::query("DELETE FROM rentals WHERE id = $1")
        .bind(rental_id)
        .execute(pool)
        .await?;

    match query_result.rows_affected() {
        0 => Err(AppError::DatabaseDeleteError {
            resource: "Rental".to_string(),
            id: rental_id.to_string(),
        }),
        _ => Ok(()),
    }
}
