//! Search-filter-sort over the provider catalog.
//!
//! [`search`] is a pure function of (providers, category filter, query). It is cheap enough
//! to rerun on every keystroke, so nothing is cached.

use serde::{Deserialize, Serialize};
use sickseek_catalog::{Provider, Specialty, HOT_THRESHOLD};

/// Label of the catch-all category chip.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection on the Find tab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Specialty(Specialty),
    /// A label that names no specialty. Matches nothing.
    Unrecognised(String),
}

impl CategoryFilter {
    /// Total, case-sensitive parse of a chip label.
    pub fn parse(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        match Specialty::from_label(label) {
            Some(specialty) => CategoryFilter::Specialty(specialty),
            None => CategoryFilter::Unrecognised(label.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Specialty(s) => s.label(),
            CategoryFilter::Unrecognised(label) => label,
        }
    }

    pub fn matches(&self, provider: &Provider) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Specialty(s) => provider.specialty == *s,
            CategoryFilter::Unrecognised(_) => false,
        }
    }
}

/// The selectable chips, in display order: "All" then every specialty.
pub fn category_chips() -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(Specialty::ALL.into_iter().map(CategoryFilter::Specialty))
        .collect()
}

/// Filters `providers` by category and free-text query, then promotes HOT providers.
///
/// A provider is kept iff the category filter matches and either the query is empty or it is
/// a case-insensitive substring of the provider's name, one of its tags, or its location.
///
/// Ordering is a stable partition: every provider with at least [`HOT_THRESHOLD`] reviews
/// comes first, and both halves keep catalog order.
pub fn search<'a>(
    providers: &'a [Provider],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Provider> {
    let needle = query.to_lowercase();

    let (hot, rest): (Vec<&Provider>, Vec<&Provider>) = providers
        .iter()
        .filter(|p| category.matches(p))
        .filter(|p| needle.is_empty() || p.matches_lowercase(&needle))
        .partition(|p| p.review_count >= HOT_THRESHOLD);

    hot.into_iter().chain(rest).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sickseek_catalog::{Catalog, LanguageTier, ProviderId};

    fn provider(id: u32, name: &str, specialty: Specialty, reviews: u32) -> Provider {
        Provider {
            id: ProviderId(id),
            name: name.into(),
            specialty,
            location: "Mapo-gu, Seoul".into(),
            rating: 4.5,
            review_count: reviews,
            language: LanguageTier::Fluent,
            insurance: vec![],
            description: String::new(),
            tags: vec![format!("tag-{id}")],
        }
    }

    fn ids(results: &[&Provider]) -> Vec<u32> {
        results.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_hot_provider_precedes_cold_provider() {
        let providers = vec![
            provider(2, "Small Clinic", Specialty::Surgery, 45),
            provider(1, "Big Hospital", Specialty::General, 1205),
        ];
        let results = search(&providers, &CategoryFilter::All, "");
        assert_eq!(ids(&results), vec![1, 2]);
    }

    #[test]
    fn test_partition_is_stable_within_buckets() {
        let providers = vec![
            provider(1, "A", Specialty::General, 10),
            provider(2, "B", Specialty::General, 300),
            provider(3, "C", Specialty::General, 99),
            provider(4, "D", Specialty::General, 100),
            provider(5, "E", Specialty::General, 0),
            provider(6, "F", Specialty::General, 150),
        ];
        let results = search(&providers, &CategoryFilter::All, "");
        assert_eq!(ids(&results), vec![2, 4, 6, 1, 3, 5]);
    }

    #[test]
    fn test_filter_is_sound_and_complete_on_builtin_catalog() {
        let catalog = Catalog::load_builtin().unwrap();
        let queries = ["", "sinchon", "ACNE", "pain", "seoul", "zzz", "e"];

        for category in category_chips()
            .into_iter()
            .chain([CategoryFilter::parse("Urology")])
        {
            for query in queries {
                let results = search(catalog.providers(), &category, query);
                let needle = query.to_lowercase();
                let expected: Vec<&Provider> = catalog
                    .providers()
                    .iter()
                    .filter(|p| category.matches(p))
                    .filter(|p| {
                        needle.is_empty()
                            || p.name.to_lowercase().contains(&needle)
                            || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                            || p.location.to_lowercase().contains(&needle)
                    })
                    .collect();

                assert_eq!(
                    results.len(),
                    expected.len(),
                    "category {:?} query {query:?}",
                    category
                );
                for p in &expected {
                    assert!(results.iter().any(|r| r.id == p.id));
                }

                // HOT before cold, catalog order inside each bucket.
                let first_cold = results.iter().position(|p| !p.is_hot());
                if let Some(idx) = first_cold {
                    assert!(results[idx..].iter().all(|p| !p.is_hot()));
                }
                let position = |id: ProviderId| {
                    catalog.providers().iter().position(|p| p.id == id).unwrap()
                };
                for pair in results.windows(2) {
                    if pair[0].is_hot() == pair[1].is_hot() {
                        assert!(position(pair[0].id) < position(pair[1].id));
                    }
                }
            }
        }
    }

    #[test]
    fn test_query_matches_location_and_tags_case_insensitively() {
        let catalog = Catalog::load_builtin().unwrap();

        let by_location = search(catalog.providers(), &CategoryFilter::All, "AHYEON");
        assert_eq!(ids(&by_location), vec![10]);

        let by_tag = search(catalog.providers(), &CategoryFilter::All, "wisdom");
        assert_eq!(ids(&by_tag), vec![6]);
    }

    #[test]
    fn test_category_filter_restricts_results() {
        let catalog = Catalog::load_builtin().unwrap();
        let dental = search(
            catalog.providers(),
            &CategoryFilter::Specialty(Specialty::Dental),
            "",
        );
        assert_eq!(ids(&dental), vec![6, 7]);

        let ent = search(catalog.providers(), &CategoryFilter::parse("ENT"), "");
        assert_eq!(ids(&ent), vec![11, 10], "HOT ENT clinic is promoted");
    }

    #[test]
    fn test_unknown_category_yields_empty_result() {
        let catalog = Catalog::load_builtin().unwrap();
        let filter = CategoryFilter::parse("Orthopedic");
        assert_eq!(filter, CategoryFilter::Unrecognised("Orthopedic".into()));
        assert!(search(catalog.providers(), &filter, "").is_empty());
    }

    #[test]
    fn test_category_chips_start_with_all() {
        let chips = category_chips();
        assert_eq!(chips.len(), 9);
        assert_eq!(chips[0], CategoryFilter::All);
        assert_eq!(chips[0].label(), "All");
        assert_eq!(chips[5].label(), "Orthopedics");
    }
}
