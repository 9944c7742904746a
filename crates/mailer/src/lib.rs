//! Outbound email delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` async transport behind the
//! [`EmailTransport`] trait so the send pipeline can be exercised with a
//! test double. Connection security is derived from the configured port:
//! 465 connects with implicit TLS, anything else negotiates STARTTLS.
//! This layer does not retry; delivery retry is the caller's policy
//! decision.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Port on which SMTP speaks implicit TLS.
const SMTPS_PORT: u16 = 465;

/// Default sender address when neither `SMTP_FROM` nor `SMTP_USER` is set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@outreach.local";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// Configuration for the SMTP transport.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (defaults to 587).
    pub port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub user: Option<String>,
    /// Optional SMTP password.
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                          |
    /// |-----------------|----------|----------------------------------|
    /// | `SMTP_HOST`     | yes      | —                                |
    /// | `SMTP_PORT`     | no       | `587`                            |
    /// | `SMTP_FROM`     | no       | `SMTP_USER`, else a placeholder  |
    /// | `SMTP_USER`     | no       | —                                |
    /// | `SMTP_PASSWORD` | no       | —                                |
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok();
        let from_address = std::env::var("SMTP_FROM")
            .ok()
            .or_else(|| user.clone())
            .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address,
            user,
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }

    /// Whether the configured port uses implicit TLS rather than STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == SMTPS_PORT
    }
}

// ---------------------------------------------------------------------------
// EmailTransport
// ---------------------------------------------------------------------------

/// Hands a fully composed message to an outbound transport.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver one HTML email.
    ///
    /// Callers guarantee all three fields are non-empty; empty input is a
    /// caller validation error, not a dispatch error.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError>;
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// SMTP-backed [`EmailTransport`].
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Build the async transport for the configured server.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let mut builder = if self.config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
        }
        .port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.user, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_owned())
            .map_err(|e| MailerError::Build(e.to_string()))?;

        self.transport()?.send(message).await?;

        tracing::info!(to, subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_port(port: u16) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port,
            from_address: "Outreach <noreply@example.com>".to_string(),
            user: None,
            password: None,
        }
    }

    #[test]
    fn port_465_uses_implicit_tls() {
        assert!(config_with_port(465).implicit_tls());
    }

    #[test]
    fn other_ports_use_starttls() {
        assert!(!config_with_port(587).implicit_tls());
        assert!(!config_with_port(25).implicit_tls());
        assert!(!config_with_port(2525).implicit_tls());
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(SmtpConfig::from_env().is_none());
    }

    #[test]
    fn mailer_error_display_build() {
        let err = MailerError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mailer_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailerError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[tokio::test]
    async fn send_rejects_an_unparseable_recipient() {
        let mailer = SmtpMailer::new(config_with_port(587));
        let result = mailer.send("definitely not an address", "Hi", "<p>x</p>").await;
        assert!(matches!(result, Err(MailerError::Address(_))));
    }
}
