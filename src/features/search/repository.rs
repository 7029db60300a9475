use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::{
    features::{
        rentals::models::{RENTAL_COLUMNS, Rental},
        schemas::contains_pattern,
        search::{
            compiler::{Operator, Predicate, PredicateValue, SortDirection, StoreQuery},
            store::{ListingStore, StoreRows},
        },
    },
    utilities::errors::AppError,
};

/// Postgres-backed listing store.
#[derive(Clone, Debug)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_predicates(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for predicate in predicates {
        qb.push(" AND ")
            .push(predicate.field.column())
            .push(predicate.operator.sql());

        match (&predicate.value, predicate.operator) {
            (PredicateValue::Text(text), Operator::Ilike) => {
                qb.push_bind(contains_pattern(text));
            }
            (PredicateValue::Text(text), _) => {
                qb.push_bind(text.clone());
            }
            (PredicateValue::Decimal(decimal), _) => {
                qb.push_bind(decimal.clone());
            }
            (PredicateValue::Integer(integer), _) => {
                qb.push_bind(*integer);
            }
        }
    }
}

fn rows_query(query: &StoreQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(RENTAL_COLUMNS)
        .push(" FROM ")
        .push(query.collection)
        .push(" WHERE 1=1");
    push_predicates(&mut qb, &query.predicates);

    let direction = match query.sort.direction {
        SortDirection::Asc => " ASC",
        SortDirection::Desc => " DESC",
    };
    qb.push(" ORDER BY ")
        .push(query.sort.field.column())
        .push(direction);
    qb.push(" OFFSET ").push_bind(query.offset);
    qb.push(" LIMIT ").push_bind(query.limit);

    qb
}

fn count_query(query: &StoreQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    qb.push(query.collection).push(" WHERE 1=1");
    push_predicates(&mut qb, &query.predicates);

    qb
}

/// Splits sqlx failures into "store unreachable" and "query rejected".
fn classify(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => AppError::StoreUnavailable(e.to_string()),
        _ => AppError::StoreQueryError(e.to_string()),
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn query(&self, query: &StoreQuery) -> Result<StoreRows, AppError> {
        let mut rows_qb = rows_query(query);
        let rows = rows_qb
            .build_query_as::<Rental>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        let exact_count = if query.want_exact_count {
            let mut count_qb = count_query(query);
            count_qb
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await
                .map_err(classify)?
        } else {
            rows.len() as i64
        };

        debug!(
            "{} returned {} of {} matching rows",
            query.collection,
            rows.len(),
            exact_count
        );

        Ok(StoreRows { rows, exact_count })
    }
}
