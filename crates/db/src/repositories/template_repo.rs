//! Repository for the `email_templates` table.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{NewTemplate, Template, UpdateTemplate};

/// Column list for `email_templates` queries.
const COLUMNS: &str = "id, name, subject, content, category, created_at";

/// Provides CRUD operations for email templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// List all templates, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM email_templates ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    /// Fetch a single template by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM email_templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a template, returning the stored row.
    pub async fn create(pool: &PgPool, input: &NewTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_templates (name, subject, content, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.content)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Update a template, leaving absent fields unchanged.
    ///
    /// Returns `None` if no template with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE email_templates \
             SET name = COALESCE($2, name), \
                 subject = COALESCE($3, subject), \
                 content = COALESCE($4, content), \
                 category = COALESCE($5, category) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.subject)
            .bind(&input.content)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM email_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
