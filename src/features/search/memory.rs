use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    features::{
        rentals::models::Rental,
        search::{
            compiler::{ListingField, Operator, Predicate, PredicateValue, SortDirection, StoreQuery},
            store::{ListingStore, StoreRows},
        },
    },
    utilities::errors::AppError,
};

/// A listing store held in memory, used by the search console and tests.
#[derive(Clone, Default, Debug)]
pub struct InMemoryListingStore {
    rentals: Arc<RwLock<Vec<Rental>>>,
}

impl InMemoryListingStore {
    pub fn new(rentals: Vec<Rental>) -> Self {
        Self {
            rentals: Arc::new(RwLock::new(rentals)),
        }
    }

    pub async fn insert(&self, rental: Rental) {
        self.rentals.write().await.push(rental);
    }

    pub async fn count(&self) -> usize {
        self.rentals.read().await.len()
    }
}

fn matches(rental: &Rental, predicate: &Predicate) -> bool {
    match (predicate.field, &predicate.value) {
        (ListingField::Location, PredicateValue::Text(text)) => match predicate.operator {
            Operator::Ilike => rental
                .location
                .to_lowercase()
                .contains(&text.to_lowercase()),
            _ => compare(predicate.operator, rental.location.as_str().cmp(text.as_str())),
        },
        (ListingField::PricePerNight, PredicateValue::Decimal(bound)) => {
            compare(predicate.operator, rental.price_per_night.cmp(bound))
        }
        (ListingField::Capacity, PredicateValue::Integer(bound)) => {
            compare(predicate.operator, i64::from(rental.capacity).cmp(bound))
        }
        // A predicate whose value does not fit its column matches nothing.
        _ => false,
    }
}

fn compare(operator: Operator, ordering: Ordering) -> bool {
    match operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Gte => ordering != Ordering::Less,
        Operator::Lte => ordering != Ordering::Greater,
        Operator::Ilike => false,
    }
}

fn sort_key_cmp(field: ListingField, a: &Rental, b: &Rental) -> Ordering {
    match field {
        ListingField::Location => a.location.cmp(&b.location),
        ListingField::PricePerNight => a.price_per_night.cmp(&b.price_per_night),
        ListingField::Capacity => a.capacity.cmp(&b.capacity),
        ListingField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn query(&self, query: &StoreQuery) -> Result<StoreRows, AppError> {
        let rentals = self.rentals.read().await;

        let mut matching: Vec<&Rental> = rentals
            .iter()
            .filter(|rental| query.predicates.iter().all(|p| matches(rental, p)))
            .collect();

        matching.sort_by(|a, b| {
            let ordering = sort_key_cmp(query.sort.field, a, b);
            match query.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let exact_count = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(StoreRows { rows, exact_count })
    }
}
