use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recommendation posted against a query.
///
/// `recommender_email` is recorded at creation and immutable afterwards;
/// delete is only permitted to that identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: Uuid,
    pub query_id: Uuid,
    pub title: String,
    pub product_name: String,
    pub product_image: Option<String>,
    pub reason: Option<String>,
    pub recommender_email: String,
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating a recommendation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub query_id: Uuid,
    pub title: String,
    pub product_name: String,
    pub product_image: Option<String>,
    pub reason: Option<String>,
    pub recommender_email: String,
}
