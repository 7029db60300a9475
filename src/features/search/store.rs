use async_trait::async_trait;

use crate::{
    features::{rentals::models::Rental, search::compiler::StoreQuery},
    utilities::errors::AppError,
};

/// Rows for one page plus the exact number of rows matching the predicates,
/// ignoring offset and limit.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct StoreRows {
    pub rows: Vec<Rental>,
    pub exact_count: i64,
}

/// The backing listing store. Implementations report transport failures as
/// [`AppError::StoreUnavailable`] and rejected queries as
/// [`AppError::StoreQueryError`].
#[async_trait]
pub trait ListingStore: Send + Sync + 'static {
    async fn query(&self, query: &StoreQuery) -> Result<StoreRows, AppError>;
}
