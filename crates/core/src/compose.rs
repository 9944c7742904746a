//! The composed-email value type.

use serde::Serialize;

use crate::error::CoreError;

/// A fully resolved email ready for dispatch.
///
/// Transient by design: a composed email exists only for the duration of
/// one send operation and is never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
}

impl ComposedEmail {
    /// Build a composed email, rejecting an empty subject or body.
    ///
    /// The send pipeline relies on this check: nothing with an empty
    /// subject or body is ever handed to the transport.
    pub fn new(subject: String, html: String) -> Result<Self, CoreError> {
        if subject.is_empty() {
            return Err(CoreError::Validation(
                "Email subject must not be empty".to_string(),
            ));
        }
        if html.is_empty() {
            return Err(CoreError::Validation(
                "Email body must not be empty".to_string(),
            ));
        }
        Ok(Self { subject, html })
    }
}
