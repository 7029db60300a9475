use serde::{Deserialize, Serialize};

use crate::features::search::{
    filter::{FilterCriteria, FilterField},
    page::{PageRequest, SearchResultPage},
    view::ResultView,
};

/// Query string of the rental search endpoint. Every value arrives as raw
/// text and goes through the same coercion as a form edit.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub location: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_capacity: Option<String>,
    pub page: Option<i64>,
}

impl SearchQuery {
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        let fields = [
            (FilterField::Location, &self.location),
            (FilterField::MinPrice, &self.min_price),
            (FilterField::MaxPrice, &self.max_price),
            (FilterField::MinCapacity, &self.min_capacity),
        ];
        for (field, raw) in fields {
            if let Some(raw) = raw {
                criteria.set_field(field, raw);
            }
        }
        criteria
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1))
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub criteria: FilterCriteria,
    pub result: SearchResultPage,
    pub view: ResultView,
}
