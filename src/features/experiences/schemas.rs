use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    features::{
        experiences::models::{ExperienceStatus, FishingType},
        schemas::ensure_non_negative,
    },
    utilities::errors::AppError,
};

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct ExperienceIn {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    pub price: BigDecimal,
    #[validate(url(message = "Image url must be a valid url"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub fishing_type: FishingType,
    #[serde(default)]
    pub status: ExperienceStatus,
}

impl ExperienceIn {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        ensure_non_negative("Price", &self.price)
    }
}

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct ExperiencePatch {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location cannot be empty"))]
    pub location: Option<String>,
    pub price: Option<BigDecimal>,
    #[validate(url(message = "Image url must be a valid url"))]
    pub image_url: Option<String>,
    pub fishing_type: Option<FishingType>,
    pub status: Option<ExperienceStatus>,
}

impl ExperiencePatch {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if let Some(price) = &self.price {
            ensure_non_negative("Price", price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.fishing_type.is_none()
            && self.status.is_none()
    }
}
