use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::{
    features::{
        experiences::{
            models::{EXPERIENCE_COLUMNS, Experience},
            schemas::{ExperienceIn, ExperiencePatch},
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

pub async fn get_many_experiences(
    pool: &PgPool,
    query: &AdminListQuery,
) -> Result<(Vec<Experience>, i64), AppError> {
    let term = query.term();

    let mut experiences_qb = QueryBuilder::<Postgres>::new("SELECT ");
    experiences_qb
        .push(EXPERIENCE_COLUMNS)
        .push(" FROM experiences WHERE 1=1");
    push_term_filter(&mut experiences_qb, term);
    experiences_qb.push(" ORDER BY created_at DESC");
    experiences_qb
        .push(" OFFSET ")
        .push_bind(query.pagination.offset);
    experiences_qb
        .push(" LIMIT ")
        .push_bind(query.pagination.limit);

    let mut count_qb =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM experiences WHERE 1=1");
    push_term_filter(&mut count_qb, term);

    let total = count_qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    let experiences = experiences_qb
        .build_query_as::<Experience>()
        .fetch_all(pool)
        .await?;

    debug!("fetched {} of {} experiences", experiences.len(), total);

    Ok((experiences, total))
}

pub async fn get_one_experience(
    pool: &PgPool,
    experience_id: &Uuid,
) -> Result<Experience, AppError> {
    let sql = format!("SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = $1");

    sqlx::query_as::<_, Experience>(&sql)
        .bind(experience_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Experience {experience_id} not found")))
}

pub async fn create_experience(
    pool: &PgPool,
    experience: &ExperienceIn,
) -> Result<Experience, AppError> {
    let sql = format!(
        r#"
        INSERT INTO experiences
            (title, description, location, price, image_url, fishing_type, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {EXPERIENCE_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Experience>(&sql)
        .bind(&experience.title)
        .bind(&experience.description)
        .bind(&experience.location)
        .bind(&experience.price)
        .bind(&experience.image_url)
        .bind(experience.fishing_type)
        .bind(experience.status)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

pub async fn update_experience(
    pool: &PgPool,
    experience_id: &Uuid,
    patch: &ExperiencePatch,
) -> Result<Experience, AppError> {
    if patch.is_empty() {
        return get_one_experience(pool, experience_id).await;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE experiences SET ");
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
    if let Some(price) = &patch.price {
        set.push("price = ").push_bind_unseparated(price.clone());
    }
    if let Some(image_url) = &patch.image_url {
        set.push("image_url = ").push_bind_unseparated(image_url.clone());
    }
    if let Some(fishing_type) = patch.fishing_type {
        set.push("fishing_type = ")
            .push_bind_unseparated(fishing_type);
    }
    if let Some(status) = patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    set.push("updated_at = now()");

    qb.push(" WHERE id = ")
        .push_bind(*experience_id)
        .push(" RETURNING ")
        .push(EXPERIENCE_COLUMNS);

    qb.build_query_as::<Experience>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Experience {experience_id} not found")))
}

pub async fn delete_experience(pool: &PgPool, experience_id: &Uuid) -> Result<(), AppError> {
    let query_result = sqlx::query("DELETE FROM experiences WHERE id = $1")
        .bind(experience_id)
        .execute(pool)
        .await?;

    match query_result.rows_affected() {
        0 => Err(AppError::DatabaseDeleteError {
            resource: "Experience".to_string(),
            id: experience_id.to_string(),
        }),
        _ => Ok(()),
    }
}
