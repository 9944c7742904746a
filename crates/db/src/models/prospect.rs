//! Prospect entity models and DTOs.

use outreach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prospects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    /// Free-form deal value as entered (e.g. `"$25,000"`).
    pub value: Option<String>,
    pub notes: Option<String>,
    pub last_contact: Timestamp,
}

/// DTO for creating a prospect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProspect {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub value: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a prospect. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProspect {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub value: Option<String>,
    pub notes: Option<String>,
}
