use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type, types::Json};
use uuid::Uuid;

use crate::features::experiences::models::Experience;

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Active,
    Inactive,
    Expired,
}

pub const OFFER_COLUMNS: &str = "id, title, description, original_price, discounted_price, \
     discount_percentage, valid_until, status, experience_id, created_at, updated_at";

#[derive(FromRow, Deserialize, Serialize, Clone, PartialEq, Default, Debug)]
pub struct Offer {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_price: BigDecimal,
    pub discounted_price: BigDecimal,
    pub discount_percentage: i32,
    pub valid_until: DateTime<Utc>,
    pub status: OfferStatus,
    pub experience_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An offer together with the experience it discounts, if any.
#[derive(FromRow, Serialize, Debug)]
pub struct OfferWithExperience {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub offer: Offer,
    pub experience: Option<Json<Experience>>,
}
