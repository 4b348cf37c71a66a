//! The assembled, validated reference catalog.

use crate::insurance::InsuranceInfo;
use crate::procedure::ProcedureCategory;
use crate::provider::Provider;
use crate::review::Review;
use crate::wire::{self, CategoryWire, InsuranceWire, ProviderWire, ReviewWire};
use crate::{CatalogError, CatalogResult};
use sickseek_types::{CategoryId, InsuranceKey, ProviderId};
use std::collections::HashSet;

const PROVIDERS_YAML: &str = include_str!("../data/providers.yaml");
const INSURANCE_YAML: &str = include_str!("../data/insurance.yaml");
const REVIEWS_YAML: &str = include_str!("../data/reviews.yaml");
const PROCEDURES_YAML: &str = include_str!("../data/procedures.yaml");

/// Raw YAML text for each catalog document.
#[derive(Clone, Copy, Debug)]
pub struct CatalogSources<'a> {
    pub providers: &'a str,
    pub insurance: &'a str,
    pub reviews: &'a str,
    pub procedures: &'a str,
}

impl CatalogSources<'static> {
    /// The documents compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            providers: PROVIDERS_YAML,
            insurance: INSURANCE_YAML,
            reviews: REVIEWS_YAML,
            procedures: PROCEDURES_YAML,
        }
    }
}

/// Immutable reference data for the whole process lifetime.
#[derive(Clone, Debug)]
pub struct Catalog {
    providers: Vec<Provider>,
    insurance: Vec<InsuranceInfo>,
    reviews: Vec<Review>,
    categories: Vec<ProcedureCategory>,
}

impl Catalog {
    /// Loads the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if an embedded document fails to parse or the assembled
    /// catalog fails validation. Both indicate a packaging bug.
    pub fn load_builtin() -> CatalogResult<Self> {
        Self::from_sources(CatalogSources::builtin())
    }

    /// Parses, translates and validates the given documents.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - any document is not valid YAML or does not match its wire schema,
    /// - a provider uses an unknown specialty or language tier,
    /// - a review lacks a provider reference,
    /// - validation fails (duplicate ids, dangling references, out-of-range ratings).
    pub fn from_sources(sources: CatalogSources<'_>) -> CatalogResult<Self> {
        let providers: Vec<ProviderWire> = wire::parse_document("providers", sources.providers)?;
        let insurance: Vec<InsuranceWire> = wire::parse_document("insurance", sources.insurance)?;
        let reviews: Vec<ReviewWire> = wire::parse_document("reviews", sources.reviews)?;
        let categories: Vec<CategoryWire> =
            wire::parse_document("procedures", sources.procedures)?;

        let catalog = Self {
            providers: providers
                .into_iter()
                .map(Provider::from_wire)
                .collect::<CatalogResult<_>>()?,
            insurance: insurance.into_iter().map(InsuranceInfo::from_wire).collect(),
            reviews: reviews
                .into_iter()
                .map(Review::from_wire)
                .collect::<CatalogResult<_>>()?,
            categories: categories
                .into_iter()
                .map(ProcedureCategory::from_wire)
                .collect::<CatalogResult<_>>()?,
        };

        catalog.validate()?;

        tracing::debug!(
            providers = catalog.providers.len(),
            insurance_types = catalog.insurance.len(),
            reviews = catalog.reviews.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    fn validate(&self) -> CatalogResult<()> {
        let mut provider_ids = HashSet::new();
        for p in &self.providers {
            if !provider_ids.insert(p.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate provider id {}",
                    p.id
                )));
            }
            if !(0.0..=5.0).contains(&p.rating) {
                return Err(CatalogError::Validation(format!(
                    "provider {} rating {} is outside 0.0-5.0",
                    p.id, p.rating
                )));
            }
            if let Some(key) = p.insurance.iter().find(|k| self.insurance_entry(k).is_none()) {
                return Err(CatalogError::Validation(format!(
                    "provider {} references unknown insurance type '{}'",
                    p.id, key
                )));
            }
        }

        let mut insurance_keys = HashSet::new();
        for i in &self.insurance {
            if !insurance_keys.insert(&i.key) {
                return Err(CatalogError::Validation(format!(
                    "duplicate insurance key '{}'",
                    i.key
                )));
            }
        }

        let mut review_ids = HashSet::new();
        for r in &self.reviews {
            if !review_ids.insert(r.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate review id {}",
                    r.id
                )));
            }
            if !provider_ids.contains(&r.provider_id) {
                return Err(CatalogError::Validation(format!(
                    "review {} references unknown provider {}",
                    r.id, r.provider_id
                )));
            }
            if !(1..=5).contains(&r.rating) {
                return Err(CatalogError::Validation(format!(
                    "review {} rating {} is outside 1-5",
                    r.id, r.rating
                )));
            }
        }

        let mut category_ids = HashSet::new();
        for c in &self.categories {
            if !category_ids.insert(&c.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate procedure category '{}'",
                    c.id
                )));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Providers
    // ------------------------------------------------------------------------

    /// All providers in catalog order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn provider(&self, id: ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    // ------------------------------------------------------------------------
    // Insurance
    // ------------------------------------------------------------------------

    pub fn insurance_types(&self) -> &[InsuranceInfo] {
        &self.insurance
    }

    fn insurance_entry(&self, key: &InsuranceKey) -> Option<&InsuranceInfo> {
        self.insurance.iter().find(|i| &i.key == key)
    }

    /// Insurance description for `key`, or the generic "no data" record when unknown.
    pub fn insurance(&self, key: &InsuranceKey) -> InsuranceInfo {
        match self.insurance_entry(key) {
            Some(info) => info.clone(),
            None => {
                tracing::debug!("no insurance data for '{}'", key);
                InsuranceInfo::no_data(key)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------------

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Reviews for one provider, in catalog order.
    pub fn reviews_for(&self, provider_id: ProviderId) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.provider_id == provider_id)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Procedures
    // ------------------------------------------------------------------------

    pub fn categories(&self) -> &[ProcedureCategory] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&ProcedureCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }
}
