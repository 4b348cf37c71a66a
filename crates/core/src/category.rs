//! Category lookup resolver.
//!
//! Maps a human-readable category label (usually a provider specialty label) to a procedure
//! category. Provider specialties and procedure categories are keyed differently, so the
//! lookup goes through a fixed normalisation table before falling back to a label match.

use serde::Serialize;
use sickseek_catalog::{CategoryId, ProcedureCategory};

/// Result of resolving a label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CategoryIdentity {
    /// The catch-all "All" label.
    All,
    /// An existing procedure category.
    Category(CategoryId),
    /// Nothing matched. Rendered with the neutral colour.
    Uncategorised,
}

/// Procedure-category key to provider label.
const LABEL_NORMALISATION: [(&str, &str); 9] = [
    ("general", "General"),
    ("dental", "Dental"),
    ("derma", "Dermatology"),
    ("ent", "ENT"),
    ("ortho", "Orthopedics"),
    ("surgery", "Surgery"),
    ("urology", "Urology"),
    ("obgyn", "OBGYN"),
    ("internal", "Internal Med"),
];

/// Resolves `label` against `categories`.
///
/// Rules, in order:
/// 1. `"All"` is [`CategoryIdentity::All`]
/// 2. an exact hit in the normalisation table gives its procedure key
/// 3. otherwise the first category whose label contains `label` (case-sensitive)
///
/// The key is only accepted if a category with that id exists. Misses resolve to
/// [`CategoryIdentity::Uncategorised`]. So does empty input: every label contains the empty
/// string, so rule 3 alone would colour a blank label as the first category.
pub fn resolve_category(categories: &[ProcedureCategory], label: &str) -> CategoryIdentity {
    if label == "All" {
        return CategoryIdentity::All;
    }
    if label.is_empty() {
        return CategoryIdentity::Uncategorised;
    }

    let key = LABEL_NORMALISATION
        .iter()
        .find(|(_, provider_label)| *provider_label == label)
        .map(|(key, _)| *key)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.label.contains(label))
                .map(|c| c.id.as_str())
        });

    match key {
        Some(key) if categories.iter().any(|c| c.id.as_str() == key) => {
            CategoryIdentity::Category(CategoryId::from(key))
        }
        _ => CategoryIdentity::Uncategorised,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sickseek_catalog::{Catalog, Specialty};

    fn resolve(label: &str) -> CategoryIdentity {
        let catalog = Catalog::load_builtin().unwrap();
        resolve_category(catalog.categories(), label)
    }

    fn category(id: &str) -> CategoryIdentity {
        CategoryIdentity::Category(CategoryId::from(id))
    }

    #[test]
    fn test_specialty_labels_resolve_through_table() {
        assert_eq!(resolve("Dermatology"), category("derma"));
        assert_eq!(resolve("ENT"), category("ent"));
        assert_eq!(resolve("Orthopedics"), category("ortho"));
        assert_eq!(resolve("OBGYN"), category("obgyn"));
        assert_eq!(resolve("General"), category("general"));
    }

    #[test]
    fn test_label_substring_fallback() {
        assert_eq!(resolve("Pharmacy"), category("pharmacy"));
        assert_eq!(resolve("Dentistry"), category("dental"));
        assert_eq!(resolve("Urgent"), category("emergency"));
    }

    #[test]
    fn test_substring_fallback_is_case_sensitive() {
        assert_eq!(resolve("pharmacy"), CategoryIdentity::Uncategorised);
    }

    #[test]
    fn test_table_hit_without_category_is_uncategorised() {
        assert_eq!(resolve("Urology"), CategoryIdentity::Uncategorised);
        assert_eq!(resolve("Internal Med"), CategoryIdentity::Uncategorised);
    }

    #[test]
    fn test_all_and_empty_labels() {
        assert_eq!(resolve("All"), CategoryIdentity::All);
        assert_eq!(resolve(""), CategoryIdentity::Uncategorised);
        assert_eq!(resolve("Cardiology"), CategoryIdentity::Uncategorised);
    }

    #[test]
    fn test_resolution_is_deterministic_for_every_specialty() {
        let catalog = Catalog::load_builtin().unwrap();
        for specialty in Specialty::ALL {
            let first = resolve_category(catalog.categories(), specialty.label());
            let second = resolve_category(catalog.categories(), specialty.label());
            assert_eq!(first, second);
        }
    }
}
