//! The per-user search state machine.
//!
//! A session starts `NotSearched` and only leaves it on an explicit search.
//! Every search or page change is tagged with a sequence number; only the
//! latest one may write its result, and a superseded store call is dropped as
//! soon as a newer request is issued.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    features::search::{
        compiler::StoreQuery,
        executor::SearchExecutor,
        filter::{FilterCriteria, FilterField},
        page::{PageRequest, SearchResultPage},
    },
    utilities::errors::AppError,
};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub enum SearchStatus {
    #[default]
    NotSearched,
    Loading,
    Loaded,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchSessionState {
    pub criteria: FilterCriteria,
    pub page: PageRequest,
    pub status: SearchStatus,
    pub last_result: Option<SearchResultPage>,
}

impl SearchSessionState {
    pub fn has_searched(&self) -> bool {
        self.status != SearchStatus::NotSearched
    }

    pub fn total_pages(&self) -> i64 {
        self.last_result
            .as_ref()
            .map_or(1, |result| result.total_pages)
    }
}

/// How an issued search ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchOutcome {
    Applied,
    /// A newer request was issued first; this one left the state alone.
    Superseded,
}

struct Issued {
    seq: u64,
    query: StoreQuery,
    page: PageRequest,
}

pub struct SearchSession {
    executor: SearchExecutor,
    state: watch::Sender<SearchSessionState>,
    latest: watch::Sender<u64>,
}

impl SearchSession {
    pub fn new(executor: SearchExecutor) -> Self {
        let (state, _) = watch::channel(SearchSessionState::default());
        let (latest, _) = watch::channel(0);

        Self {
            executor,
            state,
            latest,
        }
    }

    /// Receives every state change, for renderers.
    pub fn subscribe(&self) -> watch::Receiver<SearchSessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSessionState {
        self.state.borrow().clone()
    }

    /// Edits one filter field. Never issues a query.
    pub fn on_filter_field_change(&self, field: FilterField, raw: &str) {
        self.state
            .send_modify(|state| state.criteria.set_field(field, raw));
    }

    /// Runs the current criteria from page 1.
    pub async fn on_search_triggered(&self) -> Result<SearchOutcome, AppError> {
        let issued = self.issue(|_| Ok(PageRequest::first()))?;
        Ok(self.complete(issued).await)
    }

    /// Re-runs the current criteria on `target_page`, which must lie within
    /// `1..=total_pages` of the last result. A session that has never searched
    /// has no pages to move between.
    pub async fn on_page_change_requested(
        &self,
        target_page: i64,
    ) -> Result<SearchOutcome, AppError> {
        let issued = self.issue(|state| {
            if !state.has_searched() {
                return Err(AppError::PageOutOfRange {
                    requested: target_page,
                    total_pages: 0,
                });
            }
            let total_pages = state.total_pages();
            if !(1..=total_pages).contains(&target_page) {
                return Err(AppError::PageOutOfRange {
                    requested: target_page,
                    total_pages,
                });
            }
            Ok(PageRequest {
                page_number: target_page,
                ..state.page
            })
        })?;
        Ok(self.complete(issued).await)
    }

    /// Compiles the query, takes the next sequence number and enters `Loading`
    /// in one step. State is untouched when `target` or compilation fails.
    fn issue<F>(&self, target: F) -> Result<Issued, AppError>
    where
        F: FnOnce(&SearchSessionState) -> Result<PageRequest, AppError>,
    {
        let mut issued = Err(AppError::InternalError(
            "search was not issued".to_string(),
        ));

        self.state.send_if_modified(|state| {
            issued = target(state).and_then(|page| {
                let query = self.executor.prepare(&state.criteria, &page)?;

                let mut seq = 0;
                self.latest.send_modify(|latest| {
                    *latest += 1;
                    seq = *latest;
                });

                state.page = page;
                state.status = SearchStatus::Loading;
                Ok(Issued { seq, query, page })
            });
            issued.is_ok()
        });

        issued
    }

    async fn complete(&self, issued: Issued) -> SearchOutcome {
        let Issued { seq, query, page } = issued;
        let mut latest = self.latest.subscribe();

        debug!("search {seq} issued for page {}", page.page_number);

        let superseded = async {
            let _ = latest.wait_for(|current| *current != seq).await;
        };

        let result = tokio::select! {
            result = self.executor.run(&query, page) => result,
            _ = superseded => {
                debug!("search {seq} superseded before the store answered");
                return SearchOutcome::Superseded;
            }
        };

        self.apply(seq, result)
    }

    fn apply(&self, seq: u64, result: SearchResultPage) -> SearchOutcome {
        let mut applied = false;

        self.state.send_if_modified(|state| {
            if *self.latest.borrow() != seq {
                return false;
            }
            state.last_result = Some(result);
            state.status = SearchStatus::Loaded;
            applied = true;
            true
        });

        if applied {
            SearchOutcome::Applied
        } else {
            debug!("discarding stale result of search {seq}");
            SearchOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use tokio::sync::oneshot;
    use uuid::Uuid;

    use super::*;
    use crate::features::{
        rentals::models::Rental,
        search::{
            compiler::{ListingField, Operator, PredicateValue},
            memory::InMemoryListingStore,
            store::{ListingStore, StoreRows},
        },
    };

    fn rental(location: &str, minutes_old: i64) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            title: format!("Cabin in {location}"),
            location: location.to_string(),
            price_per_night: BigDecimal::from(120),
            capacity: 4,
            created_at: Utc::now() - chrono::Duration::minutes(minutes_old),
            ..Default::default()
        }
    }

    /// Records every query before delegating to an in-memory store.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryListingStore,
        queries: Mutex<Vec<StoreQuery>>,
    }

    impl RecordingStore {
        fn with(rentals: Vec<Rental>) -> Self {
            Self {
                inner: InMemoryListingStore::new(rentals),
                queries: Mutex::default(),
            }
        }

        fn queries(&self) -> Vec<StoreQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingStore for RecordingStore {
        async fn query(&self, query: &StoreQuery) -> Result<StoreRows, AppError> {
            self.queries.lock().unwrap().push(query.clone());
            self.inner.query(query).await
        }
    }

    /// Holds each query until the test releases its gate.
    struct GatedStore {
        gates: Mutex<VecDeque<oneshot::Receiver<StoreRows>>>,
        arrivals: watch::Sender<usize>,
    }

    impl GatedStore {
        fn new(gates: Vec<oneshot::Receiver<StoreRows>>) -> Self {
            Self {
                gates: Mutex::new(gates.into()),
                arrivals: watch::channel(0).0,
            }
        }

        async fn wait_for_arrivals(&self, count: usize) {
            let mut arrivals = self.arrivals.subscribe();
            arrivals.wait_for(|n| *n >= count).await.unwrap();
        }
    }

    #[async_trait]
    impl ListingStore for GatedStore {
        async fn query(&self, _query: &StoreQuery) -> Result<StoreRows, AppError> {
            let gate = self.gates.lock().unwrap().pop_front().unwrap();
            self.arrivals.send_modify(|n| *n += 1);
            gate.await
                .map_err(|_| AppError::StoreUnavailable("gate dropped".to_string()))
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ListingStore for FailingStore {
        async fn query(&self, _query: &StoreQuery) -> Result<StoreRows, AppError> {
            Err(AppError::StoreQueryError("syntax error".to_string()))
        }
    }

    fn session(store: Arc<dyn ListingStore>) -> SearchSession {
        SearchSession::new(SearchExecutor::new(store, Duration::from_secs(5)))
    }

    fn lakes(count: i64) -> Vec<Rental> {
        (0..count).map(|i| rental("Lake Geneva", i)).collect()
    }

    #[tokio::test]
    async fn editing_filters_issues_no_query() {
        let store = Arc::new(RecordingStore::with(lakes(3)));
        let session = session(store.clone());

        session.on_filter_field_change(FilterField::Location, "lake");
        session.on_filter_field_change(FilterField::MinCapacity, "2");

        let state = session.snapshot();
        assert_eq!(state.status, SearchStatus::NotSearched);
        assert!(!state.has_searched());
        assert!(state.last_result.is_none());
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn search_loads_the_first_page() {
        let store = Arc::new(RecordingStore::with(lakes(23)));
        let session = session(store.clone());

        let outcome = session.on_search_triggered().await.unwrap();

        assert_eq!(outcome, SearchOutcome::Applied);
        let state = session.snapshot();
        assert_eq!(state.status, SearchStatus::Loaded);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.last_result.unwrap().items.len(), 10);
    }

    #[tokio::test]
    async fn search_resets_to_the_first_page() {
        let store = Arc::new(RecordingStore::with(lakes(25)));
        let session = session(store.clone());

        session.on_search_triggered().await.unwrap();
        session.on_page_change_requested(3).await.unwrap();
        assert_eq!(session.snapshot().page.page_number, 3);

        session.on_search_triggered().await.unwrap();

        let queries = store.queries();
        assert_eq!(queries[1].offset, 20);
        assert_eq!(queries.last().unwrap().offset, 0);
        assert_eq!(session.snapshot().page.page_number, 1);
    }

    #[tokio::test]
    async fn page_change_keeps_the_criteria() {
        let store = Arc::new(RecordingStore::with(lakes(15)));
        let session = session(store.clone());

        session.on_filter_field_change(FilterField::Location, "lake");
        session.on_search_triggered().await.unwrap();
        session.on_page_change_requested(2).await.unwrap();

        let last = store.queries().pop().unwrap();
        assert_eq!(last.offset, 10);
        assert!(last.predicates.iter().any(|p| {
            p.field == ListingField::Location
                && p.operator == Operator::Ilike
                && p.value == PredicateValue::Text("lake".to_string())
        }));
        assert_eq!(session.snapshot().last_result.unwrap().items.len(), 5);
    }

    #[tokio::test]
    async fn latest_search_wins_over_a_slower_earlier_one() {
        let (release_a, gate_a) = oneshot::channel();
        let (release_b, gate_b) = oneshot::channel();
        let store = Arc::new(GatedStore::new(vec![gate_a, gate_b]));
        let session = Arc::new(session(store.clone()));

        session.on_filter_field_change(FilterField::Location, "Ushuaia");
        let search_a = tokio::spawn({
            let session = session.clone();
            async move { session.on_search_triggered().await }
        });
        store.wait_for_arrivals(1).await;

        session.on_filter_field_change(FilterField::Location, "Geneva");
        let search_b = tokio::spawn({
            let session = session.clone();
            async move { session.on_search_triggered().await }
        });
        store.wait_for_arrivals(2).await;

        release_b
            .send(StoreRows {
                rows: vec![rental("Geneva", 0)],
                exact_count: 1,
            })
            .unwrap();
        assert_eq!(search_b.await.unwrap().unwrap(), SearchOutcome::Applied);

        // A was cancelled when B was issued, so its gate may already be gone.
        let _ = release_a.send(StoreRows {
            rows: vec![rental("Ushuaia", 0)],
            exact_count: 1,
        });
        assert_eq!(search_a.await.unwrap().unwrap(), SearchOutcome::Superseded);

        let state = session.snapshot();
        assert_eq!(state.status, SearchStatus::Loaded);
        assert_eq!(state.criteria.location_substring, "Geneva");
        assert_eq!(state.last_result.unwrap().items[0].location, "Geneva");
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let session = session(Arc::new(RecordingStore::default()));

        let first = session.issue(|_| Ok(PageRequest::first())).unwrap();
        let second = session.issue(|_| Ok(PageRequest::first())).unwrap();

        let stale = SearchResultPage::new(lakes(1), 1, first.page);
        assert_eq!(session.apply(first.seq, stale), SearchOutcome::Superseded);
        assert_eq!(session.snapshot().status, SearchStatus::Loading);

        let fresh = SearchResultPage::empty(second.page);
        assert_eq!(session.apply(second.seq, fresh), SearchOutcome::Applied);
        assert_eq!(session.snapshot().status, SearchStatus::Loaded);
    }

    #[tokio::test]
    async fn store_failure_loads_an_empty_page() {
        let session = session(Arc::new(FailingStore));

        session.on_search_triggered().await.unwrap();

        let state = session.snapshot();
        assert_eq!(state.status, SearchStatus::Loaded);
        let result = state.last_result.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_pages, 1);
    }

    #[tokio::test]
    async fn out_of_range_pages_leave_state_untouched() {
        let store = Arc::new(RecordingStore::with(lakes(23)));
        let session = session(store.clone());
        session.on_search_triggered().await.unwrap();
        let before = session.snapshot();

        for target in [0, 4] {
            let err = session.on_page_change_requested(target).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::PageOutOfRange { requested, total_pages: 3 } if requested == target
            ));
        }

        assert_eq!(session.snapshot(), before);
        assert_eq!(store.queries().len(), 1);
    }

    #[tokio::test]
    async fn page_change_before_any_search_is_rejected() {
        let store = Arc::new(RecordingStore::with(lakes(3)));
        let session = session(store.clone());
        let mut updates = session.subscribe();

        let err = session.on_page_change_requested(1).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::PageOutOfRange {
                requested: 1,
                total_pages: 0
            }
        ));
        assert_eq!(session.snapshot(), SearchSessionState::default());
        assert!(!updates.has_changed().unwrap());
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_loaded() {
        let session = session(Arc::new(RecordingStore::with(lakes(2))));
        let mut updates = session.subscribe();

        session.on_search_triggered().await.unwrap();

        assert!(updates.has_changed().unwrap());
        let state = updates.borrow_and_update().clone();
        assert_eq!(state.status, SearchStatus::Loaded);
        assert_eq!(state.last_result.unwrap().total_count, 2);
    }
}
