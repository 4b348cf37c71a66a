//! Static reference data for Sick&Seek.
//!
//! This crate owns the immutable catalogs the client reads from:
//! - providers (hospitals and clinics)
//! - insurance type descriptions
//! - patient reviews
//! - procedure categories with their step-by-step flashcards
//!
//! The data ships as YAML documents embedded in the binary. Each document is parsed
//! through a strict wire model (`deny_unknown_fields`) and translated into domain types,
//! then the assembled [`Catalog`] is validated for referential integrity. After loading
//! nothing in this crate mutates.

pub mod catalog;
pub mod insurance;
pub mod procedure;
pub mod provider;
pub mod review;
mod wire;

pub use catalog::{Catalog, CatalogSources};
pub use insurance::InsuranceInfo;
pub use procedure::{Procedure, ProcedureCategory};
pub use provider::{LanguageTier, Provider, Specialty, HOT_THRESHOLD};
pub use review::{nationality_options, Review, ReviewFilter};

pub use sickseek_types::{CategoryId, InsuranceKey, ProviderId};

/// Errors returned while loading the reference catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid YAML in {document}: {source}")]
    InvalidYaml {
        document: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("translation error in {document}: {message}")]
    Translation {
        document: &'static str,
        message: String,
    },

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;
