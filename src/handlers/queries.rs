// handlers/queries.rs - /query route handlers

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::ownership::{authorize, Access};
use crate::database::models::{NewQuery, ProductQuery, QueryUpdate};
use crate::database::QueryRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text product name search; words are OR-ed together.
    pub product_name: Option<String>,
    /// Cap on the number of results returned.
    pub limit: Option<i64>,
}

/// POST /query/add - Create a query owned by the authenticated identity
///
/// The owner email comes from the verified claim, never from the body, so a
/// caller cannot create queries on someone else's behalf.
pub async fn create(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewQuery>,
) -> Result<Json<ProductQuery>, ApiError> {
    let query = QueryRepository::new(pool).insert(body, &user.email).await?;
    tracing::debug!("query {} created by {}", query.id, query.email);
    Ok(Json(query))
}

/// GET /query - Public search across all queries
pub async fn search(
    State(pool): State<PgPool>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductQuery>>, ApiError> {
    let queries = QueryRepository::new(pool)
        .search(params.product_name.as_deref(), params.limit)
        .await?;
    Ok(Json(queries))
}

/// GET /query/all - Queries created by the authenticated identity
pub async fn mine(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ProductQuery>>, ApiError> {
    let queries = QueryRepository::new(pool).list_by_owner(&user.email).await?;
    Ok(Json(queries))
}

/// GET /query/:id - Fetch a single query
pub async fn show(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductQuery>, ApiError> {
    let query = QueryRepository::new(pool)
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("query {} not found", id)))?;
    Ok(Json(query))
}

/// PUT /query/:id - Partially update a query (owner only)
pub async fn update(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<QueryUpdate>,
) -> Result<Json<ProductQuery>, ApiError> {
    let repo = QueryRepository::new(pool);
    let owner = fetch_owner(&repo, id).await?;

    if authorize(&user.email, &owner) == Access::Deny {
        return Err(ApiError::forbidden("you are not the owner of this query"));
    }

    let updated = repo.update(id, body).await?;
    Ok(Json(updated))
}

/// DELETE /query/:id - Delete a query (owner only)
pub async fn remove(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<&'static str, ApiError> {
    let repo = QueryRepository::new(pool);
    let owner = fetch_owner(&repo, id).await?;

    if authorize(&user.email, &owner) == Access::Deny {
        return Err(ApiError::forbidden("you are not the owner of this query"));
    }

    repo.delete(id).await?;
    tracing::debug!("query {} deleted by {}", id, user.email);
    Ok("Deleted")
}

/// Resolve the recorded owner before any mutation. A missing resource fails
/// closed as 404, never as a bare storage error.
async fn fetch_owner(repo: &QueryRepository, id: Uuid) -> Result<String, ApiError> {
    let query = repo
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("query {} not found", id)))?;
    Ok(query.email)
}
