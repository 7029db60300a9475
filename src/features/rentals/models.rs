use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
pub enum RentalStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Available => "available",
            RentalStatus::Booked => "booked",
            RentalStatus::Maintenance => "maintenance",
        }
    }
}

/// Columns selected whenever a full rental row is read.
pub const RENTAL_COLUMNS: &str = "id, title, description, location, price_per_night, capacity, \
     amenities, image_url, status, created_at, updated_at";

#[derive(FromRow, Deserialize, Serialize, Clone, PartialEq, Default, Debug)]
pub struct Rental {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
