use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{
    features::search::{
        compiler::{StoreQuery, compile},
        filter::FilterCriteria,
        page::{PageRequest, SearchResultPage},
        store::ListingStore,
    },
    utilities::errors::AppError,
};

/// Runs compiled searches against a listing store.
///
/// Store failures and timeouts never reach the caller: they are logged and
/// reported as an empty page, so a search always settles.
#[derive(Clone)]
pub struct SearchExecutor {
    store: Arc<dyn ListingStore>,
    timeout: Duration,
}

impl SearchExecutor {
    pub fn new(store: Arc<dyn ListingStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Only a malformed page request is returned as an error.
    pub async fn execute(
        &self,
        criteria: &FilterCriteria,
        page: PageRequest,
    ) -> Result<SearchResultPage, AppError> {
        let query = self.prepare(criteria, &page)?;

        Ok(self.run(&query, page).await)
    }

    pub fn prepare(
        &self,
        criteria: &FilterCriteria,
        page: &PageRequest,
    ) -> Result<StoreQuery, AppError> {
        let query = compile(criteria, page)?;

        if criteria.has_inverted_price_range() {
            warn!("minimum price is above maximum price, the search will match nothing");
        }

        Ok(query)
    }

    pub async fn run(&self, query: &StoreQuery, page: PageRequest) -> SearchResultPage {
        match self.try_run(query, page).await {
            Ok(result) => result,
            Err(e) => {
                warn!("search failed, showing an empty page: {e}");
                SearchResultPage::empty(page)
            }
        }
    }

    async fn try_run(
        &self,
        query: &StoreQuery,
        page: PageRequest,
    ) -> Result<SearchResultPage, AppError> {
        let mut rows = tokio::time::timeout(self.timeout, self.store.query(query))
            .await
            .map_err(|_| AppError::StoreTimeoutError {
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        rows.rows.truncate(page.page_size.max(0) as usize);

        debug!(
            "page {} holds {} of {} rentals",
            page.page_number,
            rows.rows.len(),
            rows.exact_count
        );

        Ok(SearchResultPage::new(rows.rows, rows.exact_count, page))
    }
}
