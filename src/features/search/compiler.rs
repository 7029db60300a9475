//! Turns filter criteria and a page request into a store query.
//!
//! Compilation is pure: the same inputs always yield the same [`StoreQuery`],
//! and only a malformed page request can make it fail.

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::{
    features::search::{filter::FilterCriteria, page::PageRequest},
    utilities::errors::AppError,
};

pub const RENTALS_COLLECTION: &str = "rentals";

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    Location,
    PricePerNight,
    Capacity,
    CreatedAt,
}

impl ListingField {
    pub fn column(&self) -> &'static str {
        match self {
            ListingField::Location => "location",
            ListingField::PricePerNight => "price_per_night",
            ListingField::Capacity => "capacity",
            ListingField::CreatedAt => "created_at",
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    /// Case-insensitive substring match.
    Ilike,
}

impl Operator {
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::Eq => " = ",
            Operator::Gte => " >= ",
            Operator::Lte => " <= ",
            Operator::Ilike => " ILIKE ",
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum PredicateValue {
    Text(String),
    Decimal(BigDecimal),
    Integer(i64),
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Predicate {
    pub field: ListingField,
    pub operator: Operator,
    pub value: PredicateValue,
}

impl Predicate {
    fn new(field: ListingField, operator: Operator, value: PredicateValue) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct SortOrder {
    pub field: ListingField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn newest_first() -> Self {
        Self {
            field: ListingField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoreQuery {
    pub collection: &'static str,
    pub predicates: Vec<Predicate>,
    pub sort: SortOrder,
    pub offset: i64,
    pub limit: i64,
    pub want_exact_count: bool,
}

pub fn compile(criteria: &FilterCriteria, page: &PageRequest) -> Result<StoreQuery, AppError> {
    page.validate()?;

    let mut predicates = Vec::new();

    let location = criteria.location_substring.trim();
    if !location.is_empty() {
        predicates.push(Predicate::new(
            ListingField::Location,
            Operator::Ilike,
            PredicateValue::Text(location.to_string()),
        ));
    }

    // Zero bounds are vacuous for non-negative columns and compile to nothing.
    if let Some(min_price) = criteria.min_price.bound() {
        predicates.push(Predicate::new(
            ListingField::PricePerNight,
            Operator::Gte,
            PredicateValue::Decimal(min_price.clone()),
        ));
    }
    if let Some(max_price) = criteria.max_price.bound() {
        predicates.push(Predicate::new(
            ListingField::PricePerNight,
            Operator::Lte,
            PredicateValue::Decimal(max_price.clone()),
        ));
    }
    if let Some(min_capacity) = criteria.min_capacity.bound() {
        predicates.push(Predicate::new(
            ListingField::Capacity,
            Operator::Gte,
            PredicateValue::Integer(i64::from(*min_capacity)),
        ));
    }

    Ok(StoreQuery {
        collection: RENTALS_COLLECTION,
        predicates,
        sort: SortOrder::newest_first(),
        offset: page.offset(),
        limit: page.page_size,
        want_exact_count: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::search::filter::FilterField;

    fn lake_criteria() -> FilterCriteria {
        FilterCriteria::default()
            .with_field(FilterField::Location, "  Lake ")
            .with_field(FilterField::MinPrice, "100")
            .with_field(FilterField::MaxPrice, "200")
            .with_field(FilterField::MinCapacity, "3")
    }

    #[test]
    fn compiling_twice_yields_identical_queries() {
        let criteria = lake_criteria();
        let page = PageRequest::new(2);

        assert_eq!(
            compile(&criteria, &page).unwrap(),
            compile(&criteria, &page).unwrap()
        );
    }

    #[test]
    fn default_criteria_compile_to_no_predicates() {
        let query = compile(&FilterCriteria::default(), &PageRequest::first()).unwrap();

        assert!(query.predicates.is_empty());
        assert_eq!(query.collection, RENTALS_COLLECTION);
        assert!(query.want_exact_count);
    }

    #[test]
    fn zero_and_blank_inputs_add_no_predicates() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::Location, "   ")
            .with_field(FilterField::MinPrice, "0")
            .with_field(FilterField::MaxPrice, "0")
            .with_field(FilterField::MinCapacity, "0");

        let query = compile(&criteria, &PageRequest::first()).unwrap();
        assert!(query.predicates.is_empty());
    }

    #[test]
    fn every_positive_filter_becomes_one_predicate() {
        let query = compile(&lake_criteria(), &PageRequest::first()).unwrap();

        assert_eq!(
            query.predicates,
            vec![
                Predicate::new(
                    ListingField::Location,
                    Operator::Ilike,
                    PredicateValue::Text("Lake".to_string()),
                ),
                Predicate::new(
                    ListingField::PricePerNight,
                    Operator::Gte,
                    PredicateValue::Decimal(BigDecimal::from(100)),
                ),
                Predicate::new(
                    ListingField::PricePerNight,
                    Operator::Lte,
                    PredicateValue::Decimal(BigDecimal::from(200)),
                ),
                Predicate::new(
                    ListingField::Capacity,
                    Operator::Gte,
                    PredicateValue::Integer(3),
                ),
            ]
        );
    }

    #[test]
    fn sorts_newest_first_and_pages_by_offset() {
        let query = compile(&FilterCriteria::default(), &PageRequest::new(3)).unwrap();

        assert_eq!(query.sort, SortOrder::newest_first());
        assert_eq!(query.offset, 20);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn rejects_malformed_page_requests() {
        let err = compile(&FilterCriteria::default(), &PageRequest::new(-1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidPageRequest(_)));

        let sizeless = PageRequest {
            page_number: 1,
            page_size: 0,
        };
        assert!(compile(&FilterCriteria::default(), &sizeless).is_err());
    }
}
