//! Entity models and DTOs.
//!
//! JSON field names are camelCase, matching the historical API surface.

pub mod consultation;
pub mod prospect;
pub mod template;
