use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use outreach_ai::AiError;
use outreach_core::error::CoreError;
use outreach_core::render::RenderError;
use outreach_db::store::StoreError;
use outreach_mailer::MailerError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error kinds and implements [`IntoResponse`] to
/// produce consistent JSON error responses: the router layer's sole job
/// is this 1:1 mapping from kind to status code and `{error, code}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `outreach_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backing-store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Placeholder compilation or evaluation failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The AI service failed or returned an unparseable response.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// The email transport failed.
    #[error(transparent)]
    Mail(#[from] MailerError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A collaborator required by this endpoint is not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),

            // --- Template rendering ---
            AppError::Render(err) => {
                tracing::error!(error = %err, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "Template rendering failed".to_string(),
                )
            }

            // --- AI service ---
            AppError::Ai(err) => match err {
                AiError::Format(msg) => {
                    tracing::error!(error = %msg, "AI response did not match the expected format");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AI_RESPONSE_FORMAT",
                        "AI response did not match the expected format".to_string(),
                    )
                }
                other => {
                    tracing::error!(error = %other, "AI service call failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AI_SERVICE_ERROR",
                        "Failed to get a response from the AI service".to_string(),
                    )
                }
            },

            // --- Email dispatch ---
            AppError::Mail(err) => {
                tracing::error!(error = %err, "Email dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DISPATCH_FAILED",
                    "Failed to send email".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            AppError::NotConfigured(what) => {
                tracing::error!(collaborator = what, "Collaborator not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOT_CONFIGURED",
                    format!("{what} is not configured"),
                )
            }

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 with a
/// sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
