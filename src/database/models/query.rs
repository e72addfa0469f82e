use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product query posted by a user looking for alternatives.
///
/// `email` records the identity that created the query and is immutable
/// after creation; it is the sole authorization predicate for mutations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub id: Uuid,
    pub product_name: String,
    pub product_brand: Option<String>,
    pub product_image: Option<String>,
    pub title: String,
    pub details: Option<String>,
    pub email: String,
    pub recommendation_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating a query. The owner email is never accepted
/// from the body; it is copied from the authenticated claim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuery {
    pub product_name: String,
    pub product_brand: Option<String>,
    pub product_image: Option<String>,
    pub title: String,
    pub details: Option<String>,
}

/// Partial update for a query. Absent fields keep their stored values;
/// `email` and `recommendation_count` are not updatable through the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryUpdate {
    pub product_name: Option<String>,
    pub product_brand: Option<String>,
    pub product_image: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
}
