use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewQuery, ProductQuery, QueryUpdate};
use crate::database::DatabaseError;

/// Storage access for the `queries` collection.
#[derive(Clone)]
pub struct QueryRepository {
    pool: PgPool,
}

impl QueryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new query owned by `owner_email`, with a zero recommendation
    /// count and a server-side timestamp.
    pub async fn insert(
        &self,
        new: NewQuery,
        owner_email: &str,
    ) -> Result<ProductQuery, DatabaseError> {
        let query = sqlx::query_as::<_, ProductQuery>(
            r#"
            INSERT INTO queries
                (id, product_name, product_brand, product_image, title, details,
                 email, recommendation_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.product_name)
        .bind(&new.product_brand)
        .bind(&new.product_image)
        .bind(&new.title)
        .bind(&new.details)
        .bind(owner_email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(query)
    }

    /// Public search: case-insensitive match of any search word against the
    /// product name, newest first, optionally limited.
    pub async fn search(
        &self,
        product_name: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<ProductQuery>, DatabaseError> {
        let pattern = product_name
            .map(word_or_pattern)
            .filter(|p| !p.is_empty());

        let mut sql = String::from("SELECT * FROM queries");
        if pattern.is_some() {
            sql.push_str(" WHERE product_name ~* $1");
        }
        sql.push_str(" ORDER BY created_at DESC");
        if limit.is_some() {
            sql.push_str(if pattern.is_some() { " LIMIT $2" } else { " LIMIT $1" });
        }

        let mut q = sqlx::query_as::<_, ProductQuery>(&sql);
        if let Some(pattern) = &pattern {
            q = q.bind(pattern);
        }
        if let Some(limit) = limit {
            q = q.bind(limit.max(0));
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// All queries created by one identity, newest first.
    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<ProductQuery>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductQuery>(
            "SELECT * FROM queries WHERE email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<ProductQuery>, DatabaseError> {
        let row = sqlx::query_as::<_, ProductQuery>("SELECT * FROM queries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Apply a partial update. Owner email and recommendation count are not
    /// touchable from here.
    pub async fn update(
        &self,
        id: Uuid,
        update: QueryUpdate,
    ) -> Result<ProductQuery, DatabaseError> {
        let row = sqlx::query_as::<_, ProductQuery>(
            r#"
            UPDATE queries SET
                product_name = COALESCE($2, product_name),
                product_brand = COALESCE($3, product_brand),
                product_image = COALESCE($4, product_image),
                title = COALESCE($5, title),
                details = COALESCE($6, details)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.product_name)
        .bind(&update.product_brand)
        .bind(&update.product_image)
        .bind(&update.title)
        .bind(&update.details)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound(format!("query {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM queries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("query {} not found", id)));
        }
        Ok(())
    }
}

/// Turn a free-text search into a word-OR regex pattern: "red shoes"
/// matches anything containing red OR shoes, case-insensitively.
fn word_or_pattern(input: &str) -> String {
    input
        .split_whitespace()
        .map(regex_escape)
        .collect::<Vec<_>>()
        .join("|")
}

fn regex_escape(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
