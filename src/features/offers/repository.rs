use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::{
    features::{
        offers::{
            models::{OFFER_COLUMNS, Offer, OfferWithExperience},
            schemas::{OfferIn, OfferPatch},
        },
        schemas::{AdminListQuery, contains_pattern},
    },
    utilities::errors::AppError,
};

fn push_term_filter(qb: &mut QueryBuilder<'_, Postgres>, term: Option<&str>) {
    if let Some(term) = term {
        qb.push(" AND o.title ILIKE ")
            .push_bind(contains_pattern(term));
    }
}

pub async fn get_many_offers(
    pool: &PgPool,
    query: &AdminListQuery,
) -> Result<(Vec<OfferWithExperience>, i64), AppError> {
    let term = query.term();

    let mut offers_qb = QueryBuilder::<Postgres>::new(
        r#"
        SELECT
            o.*,
            CASE WHEN e.id IS NULL THEN NULL ELSE to_jsonb(e) END AS experience
        FROM offers o
        LEFT JOIN experiences e ON e.id = o.experience_id
        WHERE 1=1
        "#,
    );
    push_term_filter(&mut offers_qb, term);
    offers_qb.push(" ORDER BY o.created_at DESC");
    offers_qb
        .push(" OFFSET ")
        .push_bind(query.pagination.offset);
    offers_qb.push(" LIMIT ").push_bind(query.pagination.limit);

    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM offers o WHERE 1=1");
    push_term_filter(&mut count_qb, term);

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let offers = offers_qb
        .build_query_as::<OfferWithExperience>()
        .fetch_all(pool)
        .await?;

    debug!("fetched {} of {} offers", offers.len(), total);

    Ok((offers, total))
}

pub async fn get_one_offer(pool: &PgPool, offer_id: &Uuid) -> Result<Offer, AppError> {
    let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1");

    sqlx::query_as::<_, Offer>(&sql)
        .bind(offer_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Offer {offer_id} not found")))
}

pub async fn create_offer(pool: &PgPool, offer: &OfferIn) -> Result<Offer, AppError> {
    let sql = format!(
        r#"
        INSERT INTO offers
            (title, description, original_price, discounted_price, discount_percentage,
             valid_until, status, experience_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {OFFER_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Offer>(&sql)
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(&offer.original_price)
        .bind(&offer.discounted_price)
        .bind(offer.discount_percentage)
        .bind(offer.valid_until)
        .bind(offer.status)
        .bind(offer.experience_id)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

pub async fn update_offer(
    pool: &PgPool,
    offer_id: &Uuid,
    patch: &OfferPatch,
) -> Result<Offer, AppError> {
    if patch.is_empty() {
        return get_one_offer(pool, offer_id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE offers SET ");
    let mut set = qb.separated(", ");
    if let Some(title) = &patch.title {
        set.push("title = ").push_bind_unseparated(title.clone());
    }
    if let Some(description) = &patch.description {
        set.push("description = ")
            .push_bind_unseparated(description.clone());
    }
    if let Some(price) = &patch.original_price {
        set.push("original_price = ")
            .push_bind_unseparated(price.clone());
    }
    if let Some(price) = &patch.discounted_price {
        set.push("discounted_price = ")
            .push_bind_unseparated(price.clone());
    }
    if let Some(discount) = patch.discount_percentage {
        set.push("discount_percentage = ")
            .push_bind_unseparated(discount);
    }
    if let Some(valid_until) = patch.valid_until {
        set.push("valid_until = ").push_bind_unseparated(valid_until);
    }
    if let Some(status) = patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(experience_id) = patch.experience_id {
        set.push("experience_id = ")
            .push_bind_unseparated(experience_id);
    }
    set.push("updated_at = now()");

    qb.push(" WHERE id = ")
        .push_bind(*offer_id)
        .push(" RETURNING ")
        .push(OFFER_COLUMNS);

    qb.build_query_as::<Offer>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Offer {offer_id} not found")))
}

pub async fn delete_offer(pool: &PgPool, offer_id: &Uuid) -> Result<(), AppError> {
    let query_result = sqlx::query("DELETE FROM offers WHERE id = $1")
        .bind(offer_id)
        .execute(pool)
        .await?;

    match query_result.rows_affected() {
        0 => Err(AppError::DatabaseDeleteError {
            resource: "Offer".to_string(),
            id: offer_id.to_string(),
        }),
        _ => Ok(()),
    }
}
