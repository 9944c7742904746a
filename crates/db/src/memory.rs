//! Seeded in-memory store.
//!
//! The non-persistent deployment variant: data lives in `RwLock`-guarded
//! lists and is lost on restart. Also the test double for the store
//! traits. Individual operations are atomic under the lock; check-then-act
//! sequences across calls can still lose updates, an accepted limitation
//! of this variant.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use outreach_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::consultation::{Consultation, NewConsultation};
use crate::models::prospect::{NewProspect, Prospect, UpdateProspect};
use crate::models::template::{NewTemplate, Template, UpdateTemplate};
use crate::store::{ConsultationStore, ProspectStore, StoreError, TemplateStore};

/// In-memory store with optional demo seed data.
pub struct MemoryStore {
    templates: RwLock<Vec<Template>>,
    prospects: RwLock<Vec<Prospect>>,
    consultations: RwLock<Vec<Consultation>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(Vec::new()),
            prospects: RwLock::new(Vec::new()),
            consultations: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a store pre-populated with demo rows.
    ///
    /// Ids are unique per table, as they would be under per-table
    /// sequences; the shared counter continues after the seed rows.
    pub fn seeded() -> Self {
        let now = Utc::now();

        let prospects = vec![
            Prospect {
                id: 1,
                name: "Sarah Johnson".into(),
                email: "sarah.johnson@techcorp.com".into(),
                company: Some("TechCorp Solutions".into()),
                service: Some("AI Integration".into()),
                source: Some("Website".into()),
                status: "new".into(),
                priority: Some("high".into()),
                value: Some("$25,000".into()),
                notes: None,
                last_contact: now,
            },
            Prospect {
                id: 2,
                name: "Michael Chen".into(),
                email: "michael.chen@innovate.io".into(),
                company: Some("Innovate Digital".into()),
                service: Some("Web Development".into()),
                source: Some("Referral".into()),
                status: "contacted".into(),
                priority: Some("medium".into()),
                value: Some("$15,000".into()),
                notes: None,
                last_contact: now,
            },
        ];

        let templates = vec![
            Template {
                id: 1,
                name: "Welcome New Lead".into(),
                subject: "Thank you for your interest".into(),
                content: "Dear {{client_name}},\n\nThank you for reaching out. \
                          We look forward to discussing how we can help your team \
                          with {{project_name}}.\n\nBest regards,\nThe Team"
                    .into(),
                category: Some("lead_nurturing".into()),
                created_at: now,
            },
            Template {
                id: 2,
                name: "Consultation Follow-up".into(),
                subject: "Great meeting you - Next steps for {{project_name}}".into(),
                content: "Hi {{client_name}},\n\nIt was great speaking with you today \
                          about {{project_name}}. The next steps are below.\n\nRegards"
                    .into(),
                category: Some("consultation".into()),
                created_at: now,
            },
        ];

        let consultations = vec![
            Consultation {
                id: 1,
                client_name: "Sarah Johnson".into(),
                email: Some("sarah.johnson@techcorp.com".into()),
                company: Some("TechCorp Solutions".into()),
                service: Some("AI Integration Consultation".into()),
                scheduled_at: Some(now + chrono::Duration::days(3)),
                duration_minutes: Some(60),
                status: "confirmed".into(),
                notes: None,
            },
            Consultation {
                id: 2,
                client_name: "Michael Chen".into(),
                email: Some("michael.chen@innovate.io".into()),
                company: Some("Innovate Digital".into()),
                service: Some("Web Development Strategy".into()),
                scheduled_at: Some(now + chrono::Duration::days(4)),
                duration_minutes: Some(45),
                status: "confirmed".into(),
                notes: None,
            },
        ];

        Self {
            templates: RwLock::new(templates),
            prospects: RwLock::new(prospects),
            consultations: RwLock::new(consultations),
            next_id: AtomicI64::new(3),
        }
    }

    fn allocate_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        Ok(self.templates.read().await.clone())
    }

    async fn get(&self, id: DbId) -> Result<Option<Template>, StoreError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create(&self, input: NewTemplate) -> Result<Template, StoreError> {
        let template = Template {
            id: self.allocate_id(),
            name: input.name,
            subject: input.subject,
            content: input.content,
            category: input.category,
            created_at: Utc::now(),
        };
        self.templates.write().await.push(template.clone());
        Ok(template)
    }

    async fn update(
        &self,
        id: DbId,
        input: UpdateTemplate,
    ) -> Result<Option<Template>, StoreError> {
        let mut templates = self.templates.write().await;
        let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            template.name = name;
        }
        if let Some(subject) = input.subject {
            template.subject = subject;
        }
        if let Some(content) = input.content {
            template.content = content;
        }
        if let Some(category) = input.category {
            template.category = Some(category);
        }
        Ok(Some(template.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut templates = self.templates.write().await;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        Ok(templates.len() < before)
    }
}

#[async_trait]
impl ProspectStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Prospect>, StoreError> {
        Ok(self.prospects.read().await.clone())
    }

    async fn get(&self, id: DbId) -> Result<Option<Prospect>, StoreError> {
        Ok(self
            .prospects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, input: NewProspect) -> Result<Prospect, StoreError> {
        let prospect = Prospect {
            id: self.allocate_id(),
            name: input.name,
            email: input.email,
            company: input.company,
            service: input.service,
            source: input.source,
            status: input.status.unwrap_or_else(|| "new".to_string()),
            priority: input.priority,
            value: input.value,
            notes: input.notes,
            last_contact: Utc::now(),
        };
        self.prospects.write().await.push(prospect.clone());
        Ok(prospect)
    }

    async fn update(
        &self,
        id: DbId,
        input: UpdateProspect,
    ) -> Result<Option<Prospect>, StoreError> {
        let mut prospects = self.prospects.write().await;
        let Some(prospect) = prospects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            prospect.name = name;
        }
        if let Some(email) = input.email {
            prospect.email = email;
        }
        if let Some(company) = input.company {
            prospect.company = Some(company);
        }
        if let Some(service) = input.service {
            prospect.service = Some(service);
        }
        if let Some(source) = input.source {
            prospect.source = Some(source);
        }
        if let Some(status) = input.status {
            prospect.status = status;
        }
        if let Some(priority) = input.priority {
            prospect.priority = Some(priority);
        }
        if let Some(value) = input.value {
            prospect.value = Some(value);
        }
        if let Some(notes) = input.notes {
            prospect.notes = Some(notes);
        }
        Ok(Some(prospect.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut prospects = self.prospects.write().await;
        let before = prospects.len();
        prospects.retain(|p| p.id != id);
        Ok(prospects.len() < before)
    }
}

#[async_trait]
impl ConsultationStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Consultation>, StoreError> {
        Ok(self.consultations.read().await.clone())
    }

    async fn create(&self, input: NewConsultation) -> Result<Consultation, StoreError> {
        let consultation = Consultation {
            id: self.allocate_id(),
            client_name: input.client_name,
            email: input.email,
            company: input.company,
            service: input.service,
            scheduled_at: input.scheduled_at,
            duration_minutes: input.duration_minutes,
            status: input.status.unwrap_or_else(|| "pending".to_string()),
            notes: input.notes,
        };
        self.consultations.write().await.push(consultation.clone());
        Ok(consultation)
    }
}
