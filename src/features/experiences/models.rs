use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "fishing_type", rename_all = "lowercase")]
pub enum FishingType {
    Sea,
    River,
    Lake,
    #[default]
    Any,
}

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "experience_status", rename_all = "lowercase")]
pub enum ExperienceStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

pub const EXPERIENCE_COLUMNS: &str = "id, title, description, location, price, image_url, \
     fishing_type, status, created_at, updated_at";

#[derive(FromRow, Deserialize, Serialize, Clone, PartialEq, Default, Debug)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub fishing_type: FishingType,
    pub status: ExperienceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
