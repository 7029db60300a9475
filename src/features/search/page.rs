use serde::{Deserialize, Serialize};

use crate::{features::rentals::models::Rental, utilities::errors::AppError};

/// Rentals shown per result page.
pub const PAGE_SIZE: i64 = 10;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl PageRequest {
    pub fn first() -> Self {
        Self::new(1)
    }

    pub fn new(page_number: i64) -> Self {
        Self {
            page_number,
            page_size: PAGE_SIZE,
        }
    }

    /// Rows skipped before this page. Saturates for pages that `validate`
    /// rejects.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }

    fn checked_offset(&self) -> Option<i64> {
        self.page_number.checked_sub(1)?.checked_mul(self.page_size)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_number < 1 {
            return Err(AppError::InvalidPageRequest(format!(
                "page number must be at least 1, got {}",
                self.page_number
            )));
        }
        if self.page_size <= 0 {
            return Err(AppError::InvalidPageRequest(format!(
                "page size must be positive, got {}",
                self.page_size
            )));
        }
        if self.checked_offset().is_none() {
            return Err(AppError::InvalidPageRequest(format!(
                "page number {} is too large",
                self.page_number
            )));
        }
        Ok(())
    }
}

/// Number of pages needed for `total_count` rows. An empty result is still
/// "page 1 of 1".
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 || page_size <= 0 {
        return 1;
    }
    (total_count + page_size - 1) / page_size
}

/// One page of matching rentals plus the exact count behind it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    pub items: Vec<Rental>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl SearchResultPage {
    pub fn new(items: Vec<Rental>, total_count: i64, page: PageRequest) -> Self {
        let total_count = total_count.max(0);
        Self {
            items,
            total_count,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages: total_pages(total_count, page.page_size),
        }
    }

    pub fn empty(page: PageRequest) -> Self {
        Self::new(Vec::new(), 0, page)
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
