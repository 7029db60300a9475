use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{offers::models::OfferStatus, schemas::ensure_non_negative},
    utilities::errors::AppError,
};

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct OfferIn {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub original_price: BigDecimal,
    pub discounted_price: BigDecimal,
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount_percentage: i32,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub status: OfferStatus,
    pub experience_id: Option<Uuid>,
}

impl OfferIn {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        ensure_non_negative("Original price", &self.original_price)?;
        ensure_non_negative("Discounted price", &self.discounted_price)
    }
}

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct OfferPatch {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<BigDecimal>,
    pub discounted_price: Option<BigDecimal>,
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount_percentage: Option<i32>,
    pub valid_until: Option<DateTime<Utc>>,
    pub status: Option<OfferStatus>,
    pub experience_id: Option<Uuid>,
}

impl OfferPatch {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if let Some(price) = &self.original_price {
            ensure_non_negative("Original price", price)?;
        }
        if let Some(price) = &self.discounted_price {
            ensure_non_negative("Discounted price", price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.original_price.is_none()
            && self.discounted_price.is_none()
            && self.discount_percentage.is_none()
            && self.valid_until.is_none()
            && self.status.is_none()
            && self.experience_id.is_none()
    }
}
