//! Insurance type descriptions shown in the insurance info modal.

use crate::wire::InsuranceWire;
use serde::Serialize;
use sickseek_types::InsuranceKey;

/// Display strings for one insurance type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InsuranceInfo {
    pub key: InsuranceKey,
    pub title: String,
    pub coverage: String,
    pub benefits: String,
    /// Who is eligible.
    pub eligibility: String,
    pub tips: String,
}

impl InsuranceInfo {
    /// Generic record returned for keys missing from the insurance table.
    pub fn no_data(key: &InsuranceKey) -> Self {
        Self {
            key: key.clone(),
            title: key.as_str().to_owned(),
            coverage: "No coverage information available.".into(),
            benefits: "No benefit information available.".into(),
            eligibility: "Unknown.".into(),
            tips: "Ask the front desk which insurance they accept.".into(),
        }
    }

    pub(crate) fn from_wire(wire: InsuranceWire) -> Self {
        Self {
            key: InsuranceKey::new(wire.key),
            title: wire.title,
            coverage: wire.coverage,
            benefits: wire.benefits,
            eligibility: wire.who,
            tips: wire.tips,
        }
    }
}
