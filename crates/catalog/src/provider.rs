//! Providers: hospitals and clinics listed on the Find tab.

use crate::wire::ProviderWire;
use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use sickseek_types::{InsuranceKey, ProviderId};

/// Review count at which a provider is promoted to the front of search results.
pub const HOT_THRESHOLD: u32 = 100;

/// Medical specialty of a provider. This is a closed set.
///
/// Declaration order is the order of the category chips on the Find tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    General,
    Dental,
    Dermatology,
    #[serde(rename = "ENT")]
    Ent,
    Orthopedics,
    #[serde(rename = "Internal Med")]
    InternalMed,
    #[serde(rename = "OBGYN")]
    Obgyn,
    Surgery,
}

impl Specialty {
    pub const ALL: [Specialty; 8] = [
        Specialty::General,
        Specialty::Dental,
        Specialty::Dermatology,
        Specialty::Ent,
        Specialty::Orthopedics,
        Specialty::InternalMed,
        Specialty::Obgyn,
        Specialty::Surgery,
    ];

    /// Display label, also the wire value.
    pub fn label(self) -> &'static str {
        match self {
            Specialty::General => "General",
            Specialty::Dental => "Dental",
            Specialty::Dermatology => "Dermatology",
            Specialty::Ent => "ENT",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::InternalMed => "Internal Med",
            Specialty::Obgyn => "OBGYN",
            Specialty::Surgery => "Surgery",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How well staff speak English, ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageTier {
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl LanguageTier {
    pub fn label(self) -> &'static str {
        match self {
            LanguageTier::Intermediate => "Intermediate",
            LanguageTier::Advanced => "Advanced",
            LanguageTier::Fluent => "Fluent",
            LanguageTier::Native => "Native",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Intermediate" => Some(LanguageTier::Intermediate),
            "Advanced" => Some(LanguageTier::Advanced),
            "Fluent" => Some(LanguageTier::Fluent),
            "Native" => Some(LanguageTier::Native),
            _ => None,
        }
    }
}

/// A hospital or clinic catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub specialty: Specialty,
    pub location: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    pub review_count: u32,
    pub language: LanguageTier,
    pub insurance: Vec<InsuranceKey>,
    pub description: String,
    pub tags: Vec<String>,
}

impl Provider {
    /// Whether the provider carries the HOT badge.
    pub fn is_hot(&self) -> bool {
        self.review_count >= HOT_THRESHOLD
    }

    /// Case-insensitive substring match against name, tags and location.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.location.to_lowercase().contains(needle)
    }

    pub(crate) fn from_wire(wire: ProviderWire) -> CatalogResult<Self> {
        let translation = |message: String| CatalogError::Translation {
            document: "providers",
            message,
        };

        let specialty = Specialty::from_label(&wire.specialty).ok_or_else(|| {
            translation(format!(
                "provider {} has unknown specialty '{}'",
                wire.id, wire.specialty
            ))
        })?;
        let language = LanguageTier::from_label(&wire.english_level).ok_or_else(|| {
            translation(format!(
                "provider {} has unknown language tier '{}'",
                wire.id, wire.english_level
            ))
        })?;

        Ok(Self {
            id: ProviderId(wire.id),
            name: wire.name,
            specialty,
            location: wire.location,
            rating: wire.rating,
            review_count: wire.reviews,
            language,
            insurance: wire.insurance.into_iter().map(InsuranceKey::new).collect(),
            description: wire.description,
            tags: wire.tags,
        })
    }
}
