use std::sync::Arc;

use outreach_ai::AiClient;
use outreach_db::store::{ConsultationStore, ProspectStore, TemplateStore};
use outreach_db::DbPool;
use outreach_mailer::EmailTransport;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database connection pool; present only in the Postgres variant.
    pub pool: Option<DbPool>,
    /// Email template storage.
    pub templates: Arc<dyn TemplateStore>,
    /// Prospect storage.
    pub prospects: Arc<dyn ProspectStore>,
    /// Consultation storage.
    pub consultations: Arc<dyn ConsultationStore>,
    /// AI composition client, when `OPENAI_API_KEY` is configured.
    pub ai: Option<Arc<AiClient>>,
    /// Outbound email transport, when SMTP is configured.
    pub mailer: Option<Arc<dyn EmailTransport>>,
}

impl AppState {
    /// The AI client, or the not-configured error for AI endpoints.
    pub fn ai(&self) -> Result<&Arc<AiClient>, AppError> {
        self.ai.as_ref().ok_or(AppError::NotConfigured("AI service"))
    }

    /// The email transport, or the not-configured error for send
    /// endpoints.
    pub fn mailer(&self) -> Result<&Arc<dyn EmailTransport>, AppError> {
        self.mailer
            .as_ref()
            .ok_or(AppError::NotConfigured("Email transport"))
    }
}
