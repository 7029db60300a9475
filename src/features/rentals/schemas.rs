use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    features::{rentals::models::RentalStatus, schemas::ensure_non_negative},
    utilities::errors::AppError,
};

// -- =====================
// -- IN
// -- =====================
#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct RentalIn {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    pub price_per_night: BigDecimal,
    #[validate(range(min = 1, message = "Capacity must be at least one guest"))]
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(url(message = "Image url must be a valid url"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: RentalStatus,
}

impl RentalIn {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        ensure_non_negative("Price per night", &self.price_per_night)
    }
}

#[derive(Serialize, Deserialize, Validate, Default, Debug)]
pub struct RentalPatch {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location cannot be empty"))]
    pub location: Option<String>,
    pub price_per_night: Option<BigDecimal>,
    #[validate(range(min = 1, message = "Capacity must be at least one guest"))]
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    #[validate(url(message = "Image url must be a valid url"))]
    pub image_url: Option<String>,
    pub status: Option<RentalStatus>,
}

impl RentalPatch {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if let Some(price) = &self.price_per_night {
            ensure_non_negative("Price per night", price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.price_per_night.is_none()
            && self.capacity.is_none()
            && self.amenities.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabin() -> RentalIn {
        RentalIn {
            title: "Lakeside cabin".to_string(),
            location: "Lago Fagnano".to_string(),
            price_per_night: BigDecimal::from(120),
            capacity: 4,
            ..Default::default()
        }
    }

    #[test]
    fn accepts_a_complete_rental() {
        assert!(cabin().check().is_ok());
    }

    #[test]
    fn rejects_zero_capacity_and_negative_price() {
        let mut rental = cabin();
        rental.capacity = 0;
        assert!(matches!(
            rental.check(),
            Err(AppError::ValidatorValidationErrors(_))
        ));

        let mut rental = cabin();
        rental.price_per_night = BigDecimal::from(-1);
        assert!(matches!(rental.check(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn patch_with_no_fields_is_empty() {
        assert!(RentalPatch::default().is_empty());
        let patch = RentalPatch {
            capacity: Some(2),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.check().is_ok());
    }
}
