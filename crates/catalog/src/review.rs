//! Patient reviews shown on the provider detail screen.

use crate::wire::ReviewWire;
use crate::{CatalogError, CatalogResult};
use serde::Serialize;
use sickseek_types::ProviderId;

/// Sentinel used by the nationality filter to mean "no filtering".
pub const ALL_NATIONALITIES: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: u32,
    pub provider_id: ProviderId,
    pub author: String,
    pub nationality: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub tags: Vec<String>,
}

impl Review {
    /// Every review must name the provider it belongs to.
    pub(crate) fn from_wire(wire: ReviewWire) -> CatalogResult<Self> {
        let provider_id = wire.hospital_id.ok_or_else(|| {
            CatalogError::Validation(format!("review {} has no hospitalId", wire.id))
        })?;

        Ok(Self {
            id: wire.id,
            provider_id: ProviderId(provider_id),
            author: wire.user,
            nationality: wire.nationality,
            rating: wire.rating,
            comment: wire.comment,
            tags: wire.tags,
        })
    }
}

/// Nationality filter on the reviews list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Nationality(String),
}

impl ReviewFilter {
    /// `"All"` (or blank) means no filtering; anything else is an exact nationality label.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == ALL_NATIONALITIES {
            ReviewFilter::All
        } else {
            ReviewFilter::Nationality(label.to_owned())
        }
    }

    pub fn accepts(&self, review: &Review) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Nationality(n) => review.nationality == *n,
        }
    }

    pub fn apply<'a>(&self, reviews: &[&'a Review]) -> Vec<&'a Review> {
        reviews.iter().copied().filter(|r| self.accepts(r)).collect()
    }
}

/// Options for the nationality drop-down: `"All"` followed by each distinct
/// nationality in first-seen order.
pub fn nationality_options(reviews: &[&Review]) -> Vec<String> {
    let mut options = vec![ALL_NATIONALITIES.to_owned()];
    for review in reviews {
        if !options.iter().any(|o| *o == review.nationality) {
            options.push(review.nationality.clone());
        }
    }
    options
}
