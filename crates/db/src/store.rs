//! Store trait abstractions over the backing stores.
//!
//! Handlers depend on these traits rather than on sqlx directly, so the
//! production Postgres store and the seeded in-memory variant are
//! interchangeable, and tests run without a database.

use async_trait::async_trait;
use outreach_core::types::DbId;

use crate::models::consultation::{Consultation, NewConsultation};
use crate::models::prospect::{NewProspect, Prospect, UpdateProspect};
use crate::models::template::{NewTemplate, Template, UpdateTemplate};

/// Error from a backing-store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage for email templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Template>, StoreError>;
    async fn get(&self, id: DbId) -> Result<Option<Template>, StoreError>;
    async fn create(&self, input: NewTemplate) -> Result<Template, StoreError>;
    async fn update(&self, id: DbId, input: UpdateTemplate)
        -> Result<Option<Template>, StoreError>;
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Storage for prospects.
#[async_trait]
pub trait ProspectStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Prospect>, StoreError>;
    async fn get(&self, id: DbId) -> Result<Option<Prospect>, StoreError>;
    async fn create(&self, input: NewProspect) -> Result<Prospect, StoreError>;
    async fn update(&self, id: DbId, input: UpdateProspect)
        -> Result<Option<Prospect>, StoreError>;
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Storage for consultations.
#[async_trait]
pub trait ConsultationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Consultation>, StoreError>;
    async fn create(&self, input: NewConsultation) -> Result<Consultation, StoreError>;
}
