//! The composed send flow: template resolution, placeholder rendering,
//! and dispatch.
//!
//! The stages run strictly in sequence and any failure short-circuits
//! the rest; nothing is handed to the transport unless every earlier
//! stage succeeded.

use std::collections::HashMap;

use serde::Deserialize;

use outreach_core::compose::ComposedEmail;
use outreach_core::error::CoreError;
use outreach_core::render;
use outreach_core::types::DbId;
use outreach_db::store::TemplateStore;
use outreach_mailer::EmailTransport;

use crate::error::{AppError, AppResult};

/// Request body for `POST /api/templates/send`.
///
/// Accepts a stored template id, inline subject/html overrides, or both
/// (template as base, overrides win).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTemplateRequest {
    pub template_id: Option<DbId>,
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub recipient_email: String,
    pub subject: Option<String>,
    pub html: Option<String>,
    #[serde(default)]
    pub template_data: HashMap<String, String>,
}

/// Resolve, render, and dispatch one templated email.
pub async fn send_from_template(
    templates: &dyn TemplateStore,
    mailer: &dyn EmailTransport,
    req: SendTemplateRequest,
) -> AppResult<()> {
    if req.recipient_email.is_empty() {
        return Err(AppError::BadRequest("recipientEmail is required".to_string()));
    }

    // Resolve the stored template, when one is referenced.
    let template = match req.template_id {
        Some(id) => Some(templates.get(id).await?.ok_or(AppError::Core(
            CoreError::NotFound {
                entity: "Template",
                id,
            },
        ))?),
        None => None,
    };

    // Overrides win over the stored values; empty overrides fall through.
    let subject = req
        .subject
        .filter(|s| !s.is_empty())
        .or_else(|| template.as_ref().map(|t| t.subject.clone()))
        .unwrap_or_default();
    let html = req
        .html
        .filter(|h| !h.is_empty())
        .or_else(|| template.as_ref().map(|t| t.content.clone()))
        .unwrap_or_default();

    if subject.is_empty() || html.is_empty() {
        return Err(AppError::BadRequest(
            "subject and html (or a valid template) are required".to_string(),
        ));
    }

    // Placeholder data, then rendering.
    let data = render::build_render_data(req.recipient_name.as_deref(), req.template_data);
    let (subject, html) = render::render(&subject, &html, &data)?;

    // A template of nothing but placeholders can render to an empty
    // subject or body; that is still a caller error, never a dispatch.
    let email = ComposedEmail::new(subject, html)?;

    mailer
        .send(&req.recipient_email, &email.subject, &email.html)
        .await?;

    tracing::info!(
        to = %req.recipient_email,
        template_id = ?req.template_id,
        "Templated email dispatched"
    );
    Ok(())
}
