//! Email template entity models and DTOs.

use outreach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `email_templates` table.
///
/// Subject and content may contain `{{placeholder}}` tokens; content is
/// either HTML or plain text (plain text is normalised to `<br/>` line
/// breaks at render time).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub subject: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    pub category: Option<String>,
}

/// DTO for updating a template. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}
