//! Repository for the `consultations` table.

use sqlx::PgPool;

use crate::models::consultation::{Consultation, NewConsultation};

/// Column list for `consultations` queries.
const COLUMNS: &str =
    "id, client_name, email, company, service, scheduled_at, duration_minutes, status, notes";

/// Status a freshly created consultation gets when none is supplied.
const DEFAULT_STATUS: &str = "pending";

/// Provides CRUD operations for consultations.
pub struct ConsultationRepo;

impl ConsultationRepo {
    /// List all consultations, soonest scheduled first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Consultation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM consultations ORDER BY scheduled_at ASC NULLS LAST, id ASC");
        sqlx::query_as::<_, Consultation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Create a consultation, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &NewConsultation,
    ) -> Result<Consultation, sqlx::Error> {
        let query = format!(
            "INSERT INTO consultations \
             (client_name, email, company, service, scheduled_at, duration_minutes, status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Consultation>(&query)
            .bind(&input.client_name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.service)
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }
}
