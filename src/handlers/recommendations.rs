// handlers/recommendations.rs - /recommendation route handlers

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::ownership::{authorize, Access};
use crate::database::models::{NewRecommendation, Recommendation};
use crate::database::RecommendationRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// POST /recommendation/add - Post a recommendation against a query
///
/// Inserts the recommendation and bumps the parent query's recommendation
/// count in a single transaction; an unknown query id yields 404 and leaves
/// nothing behind.
pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<NewRecommendation>,
) -> Result<Json<Recommendation>, ApiError> {
    let recommendation = RecommendationRepository::new(pool).insert(body).await?;
    Ok(Json(recommendation))
}

/// GET /recommendation/all - Recommendations made by the authenticated identity
pub async fn mine(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let rows = RecommendationRepository::new(pool)
        .list_by_recommender(&user.email)
        .await?;
    Ok(Json(rows))
}

/// GET /recommendation/foruser - Recommendations made by other identities
pub async fn for_user(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let rows = RecommendationRepository::new(pool)
        .list_excluding(&user.email)
        .await?;
    Ok(Json(rows))
}

/// GET /recommendation/all/:query_id - Recommendations for one query
pub async fn for_query(
    State(pool): State<PgPool>,
    Path(query_id): Path<Uuid>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let rows = RecommendationRepository::new(pool)
        .list_for_query(query_id)
        .await?;
    Ok(Json(rows))
}

/// GET /recommendation/:id - Fetch a single recommendation
pub async fn show(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recommendation>, ApiError> {
    let recommendation = RecommendationRepository::new(pool)
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("recommendation {} not found", id)))?;
    Ok(Json(recommendation))
}

/// DELETE /recommendation/:id - Delete a recommendation (owner only)
///
/// Ownership is checked against the email recorded at creation; on deny the
/// delete never reaches storage. A missing resource fails closed as 404.
pub async fn remove(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<&'static str, ApiError> {
    let repo = RecommendationRepository::new(pool);

    let recommendation = repo
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("recommendation {} not found", id)))?;

    if authorize(&user.email, &recommendation.recommender_email) == Access::Deny {
        return Err(ApiError::forbidden(
            "you are not authorized to delete this recommendation",
        ));
    }

    repo.delete(id).await?;
    tracing::debug!("recommendation {} deleted by {}", id, user.email);
    Ok("Deleted")
}
