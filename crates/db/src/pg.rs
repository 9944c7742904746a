//! Postgres-backed store implementation.
//!
//! Thin adapter that satisfies the [`store`](crate::store) traits by
//! delegating to the repository layer. Concurrency control is the
//! database's job; this type is just a pool handle.

use async_trait::async_trait;
use outreach_core::types::DbId;

use crate::models::consultation::{Consultation, NewConsultation};
use crate::models::prospect::{NewProspect, Prospect, UpdateProspect};
use crate::models::template::{NewTemplate, Template, UpdateTemplate};
use crate::repositories::{ConsultationRepo, ProspectRepo, TemplateRepo};
use crate::store::{ConsultationStore, ProspectStore, StoreError, TemplateStore};
use crate::DbPool;

/// Store backed by the Postgres connection pool.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgStore {
    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        Ok(TemplateRepo::list(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> Result<Option<Template>, StoreError> {
        Ok(TemplateRepo::get(&self.pool, id).await?)
    }

    async fn create(&self, input: NewTemplate) -> Result<Template, StoreError> {
        Ok(TemplateRepo::create(&self.pool, &input).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: UpdateTemplate,
    ) -> Result<Option<Template>, StoreError> {
        Ok(TemplateRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(TemplateRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ProspectStore for PgStore {
    async fn list(&self) -> Result<Vec<Prospect>, StoreError> {
        Ok(ProspectRepo::list(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> Result<Option<Prospect>, StoreError> {
        Ok(ProspectRepo::get(&self.pool, id).await?)
    }

    async fn create(&self, input: NewProspect) -> Result<Prospect, StoreError> {
        Ok(ProspectRepo::create(&self.pool, &input).await?)
    }

    async fn update(
        &self,
        id: DbId,
        input: UpdateProspect,
    ) -> Result<Option<Prospect>, StoreError> {
        Ok(ProspectRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProspectRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ConsultationStore for PgStore {
    async fn list(&self) -> Result<Vec<Consultation>, StoreError> {
        Ok(ConsultationRepo::list(&self.pool).await?)
    }

    async fn create(&self, input: NewConsultation) -> Result<Consultation, StoreError> {
        Ok(ConsultationRepo::create(&self.pool, &input).await?)
    }
}
