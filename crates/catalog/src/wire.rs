//! Wire models for the embedded YAML documents.
//!
//! These are the exact on-disk shapes. Translation into domain types lives next to each
//! domain type so that label parsing stays in one place.

use crate::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Parse one YAML document into its wire model.
///
/// Uses `serde_path_to_error` so a schema mismatch names the failing field
/// (e.g. `[3].englishLevel`).
pub(crate) fn parse_document<T: DeserializeOwned>(
    document: &'static str,
    yaml_text: &str,
) -> CatalogResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize::<_, T>(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            if path.is_empty() || path == "." {
                return Err(CatalogError::InvalidYaml { document, source });
            }
            Err(CatalogError::Translation {
                document,
                message: format!("schema mismatch at {path}: {source}"),
            })
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProviderWire {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub specialty: String,
    pub location: String,
    pub rating: f32,
    pub reviews: u32,
    #[serde(rename = "englishLevel")]
    pub english_level: String,
    #[serde(default)]
    pub insurance: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InsuranceWire {
    pub key: String,
    pub title: String,
    pub coverage: String,
    pub benefits: String,
    pub who: String,
    pub tips: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReviewWire {
    pub id: u32,
    #[serde(rename = "hospitalId")]
    pub hospital_id: Option<u32>,
    pub user: String,
    pub nationality: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CategoryWire {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub procedures: Vec<ProcedureWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProcedureWire {
    pub title: String,
    pub steps: Vec<String>,
}
