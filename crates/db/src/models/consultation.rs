//! Consultation entity models and DTOs.

use outreach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `consultations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: DbId,
    pub client_name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
}

/// DTO for creating a consultation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsultation {
    #[serde(default)]
    pub client_name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
