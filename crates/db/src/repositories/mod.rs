//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod consultation_repo;
pub mod prospect_repo;
pub mod template_repo;

pub use consultation_repo::ConsultationRepo;
pub use prospect_repo::ProspectRepo;
pub use template_repo::TemplateRepo;
