use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewRecommendation, Recommendation};
use crate::database::DatabaseError;

/// Storage access for the `recommendations` collection.
#[derive(Clone)]
pub struct RecommendationRepository {
    pool: PgPool,
}

impl RecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a recommendation and bump the parent query's recommendation
    /// count, as one transaction. An unknown query id aborts the whole
    /// operation and nothing is left half-applied.
    pub async fn insert(&self, new: NewRecommendation) -> Result<Recommendation, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE queries SET recommendation_count = recommendation_count + 1 WHERE id = $1",
        )
        .bind(new.query_id)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "query {} not found",
                new.query_id
            )));
        }

        let recommendation = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations
                (id, query_id, title, product_name, product_image, reason,
                 recommender_email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.query_id)
        .bind(&new.title)
        .bind(&new.product_name)
        .bind(&new.product_image)
        .bind(&new.reason)
        .bind(&new.recommender_email)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(recommendation)
    }

    /// Recommendations made by one identity, newest first.
    pub async fn list_by_recommender(
        &self,
        email: &str,
    ) -> Result<Vec<Recommendation>, DatabaseError> {
        let rows = sqlx::query_as::<_, Recommendation>(
            "SELECT * FROM recommendations WHERE recommender_email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Recommendations made by everyone except one identity, newest first.
    pub async fn list_excluding(&self, email: &str) -> Result<Vec<Recommendation>, DatabaseError> {
        let rows = sqlx::query_as::<_, Recommendation>(
            "SELECT * FROM recommendations WHERE recommender_email <> $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All recommendations against one query, newest first.
    pub async fn list_for_query(
        &self,
        query_id: Uuid,
    ) -> Result<Vec<Recommendation>, DatabaseError> {
        let rows = sqlx::query_as::<_, Recommendation>(
            "SELECT * FROM recommendations WHERE query_id = $1 ORDER BY created_at DESC",
        )
        .bind(query_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<Recommendation>, DatabaseError> {
        let row = sqlx::query_as::<_, Recommendation>("SELECT * FROM recommendations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Delete a recommendation and decrement the parent query's count, as
    /// one transaction. The parent may already be gone; that is fine.
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let query_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM recommendations WHERE id = $1 RETURNING query_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let query_id = query_id.ok_or_else(|| {
            DatabaseError::NotFound(format!("recommendation {} not found", id))
        })?;

        sqlx::query(
            "UPDATE queries SET recommendation_count = recommendation_count - 1 \
             WHERE id = $1 AND recommendation_count > 0",
        )
        .bind(query_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
