//! Repository for the `prospects` table.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::prospect::{NewProspect, Prospect, UpdateProspect};

/// Column list for `prospects` queries.
const COLUMNS: &str =
    "id, name, email, company, service, source, status, priority, value, notes, last_contact";

/// Status a freshly created prospect gets when none is supplied.
const DEFAULT_STATUS: &str = "new";

/// Provides CRUD operations for prospects.
pub struct ProspectRepo;

impl ProspectRepo {
    /// List all prospects, most recently contacted first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Prospect>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prospects ORDER BY last_contact DESC, id DESC");
        sqlx::query_as::<_, Prospect>(&query).fetch_all(pool).await
    }

    /// Fetch a single prospect by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Prospect>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prospects WHERE id = $1");
        sqlx::query_as::<_, Prospect>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a prospect, returning the stored row.
    ///
    /// `last_contact` is stamped by the database.
    pub async fn create(pool: &PgPool, input: &NewProspect) -> Result<Prospect, sqlx::Error> {
        let query = format!(
            "INSERT INTO prospects (name, email, company, service, source, status, priority, value, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.service)
            .bind(&input.source)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(&input.priority)
            .bind(&input.value)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Update a prospect, leaving absent fields unchanged.
    ///
    /// Returns `None` if no prospect with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProspect,
    ) -> Result<Option<Prospect>, sqlx::Error> {
        let query = format!(
            "UPDATE prospects \
             SET name = COALESCE($2, name), \
                 email = COALESCE($3, email), \
                 company = COALESCE($4, company), \
                 service = COALESCE($5, service), \
                 source = COALESCE($6, source), \
                 status = COALESCE($7, status), \
                 priority = COALESCE($8, priority), \
                 value = COALESCE($9, value), \
                 notes = COALESCE($10, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.service)
            .bind(&input.source)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.value)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prospect. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prospects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
