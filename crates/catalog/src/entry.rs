use serde::{Deserialize, Serialize};

use quickbill_core::{Money, ValueObject};

/// One row of the price list.
///
/// Immutable after load. A blank field is stored as an empty string; an empty
/// field never matches a non-empty query term (it is "no match", not an
/// error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub brand: String,
    pub reference_code: String,
    pub kind: String,
    pub price: Money,
}

impl ValueObject for CatalogEntry {}

/// Substring query over brand / reference code / type.
///
/// Terms are normalized at construction: empty strings become "no
/// constraint", everything else is lowercased once so matching does not
/// re-lowercase per entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    brand: Option<String>,
    reference: Option<String>,
    kind: Option<String>,
}

impl CatalogQuery {
    pub fn new(brand: &str, reference: &str, kind: &str) -> Self {
        Self {
            brand: normalize_term(brand),
            reference: normalize_term(reference),
            kind: normalize_term(kind),
        }
    }

    /// True when no term constrains the result (the query returns everything).
    pub fn is_unconstrained(&self) -> bool {
        self.brand.is_none() && self.reference.is_none() && self.kind.is_none()
    }

    /// All supplied terms must match (logical AND), case-insensitively.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        field_matches(&entry.brand, self.brand.as_deref())
            && field_matches(&entry.reference_code, self.reference.as_deref())
            && field_matches(&entry.kind, self.kind.as_deref())
    }
}

fn normalize_term(term: &str) -> Option<String> {
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

fn field_matches(field: &str, term: Option<&str>) -> bool {
    match term {
        None => true,
        Some(t) => field.to_lowercase().contains(t),
    }
}

/// The in-memory price list, preserving source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the matching subset in catalog order.
    ///
    /// Pure: no dedup, no ranking, and an empty result is a valid outcome.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| query.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(brand: &str, reference: &str, kind: &str, price: &str) -> CatalogEntry {
        CatalogEntry {
            brand: brand.to_string(),
            reference_code: reference.to_string(),
            kind: kind.to_string(),
            price: price.parse().unwrap(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            entry("Acme", "N123", "Tablet", "10.00"),
            entry("Beta Labs", "B200", "Strip", "5.00"),
            entry("acme pharma", "N124", "Tablet", "12.50"),
            entry("Gamma", "G1", "", "1.00"),
        ])
    }

    #[test]
    fn brand_query_is_case_insensitive() {
        let catalog = Catalog::new(vec![entry("Acme", "N123", "Tablet", "10.00")]);
        let results = catalog.filter(&CatalogQuery::new("acme", "", ""));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].brand, "Acme");

        let results = catalog.filter(&CatalogQuery::new("ACME", "", ""));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_query_returns_whole_catalog_in_order() {
        let catalog = sample_catalog();
        let query = CatalogQuery::new("", "", "");
        assert!(query.is_unconstrained());

        let results = catalog.filter(&query);
        let all: Vec<&CatalogEntry> = catalog.entries().iter().collect();
        assert_eq!(results, all);
    }

    #[test]
    fn terms_combine_with_and() {
        let catalog = sample_catalog();

        let by_brand = catalog.filter(&CatalogQuery::new("acme", "", ""));
        assert_eq!(by_brand.len(), 2);

        let by_brand_and_ref = catalog.filter(&CatalogQuery::new("acme", "N124", ""));
        assert_eq!(by_brand_and_ref.len(), 1);
        assert_eq!(by_brand_and_ref[0].reference_code, "N124");
    }

    #[test]
    fn blank_field_never_matches_a_term() {
        let catalog = sample_catalog();
        // "Gamma" has an empty kind; a kind term must exclude it.
        let results = catalog.filter(&CatalogQuery::new("gamma", "", "tablet"));
        assert!(results.is_empty());
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let catalog = sample_catalog();
        let results = catalog.filter(&CatalogQuery::new("nonexistent", "", ""));
        assert!(results.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_entry() -> impl Strategy<Value = CatalogEntry> {
            (
                "[A-Za-z ]{0,12}",
                "[A-Z0-9#()-]{0,10}",
                "[A-Za-z]{0,8}",
                0u32..100_000,
            )
                .prop_map(|(brand, reference, kind, cents)| CatalogEntry {
                    brand,
                    reference_code: reference,
                    kind,
                    price: Money::new(rust_decimal::Decimal::new(i64::from(cents), 2)),
                })
        }

        fn arb_term() -> impl Strategy<Value = String> {
            prop_oneof![Just(String::new()), "[A-Za-z0-9]{1,3}"]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: filter results are a sound and complete subset.
            ///
            /// Every result matches all supplied terms, and every excluded
            /// entry fails at least one term.
            #[test]
            fn filter_is_sound_and_complete(
                entries in proptest::collection::vec(arb_entry(), 0..40),
                brand in arb_term(),
                reference in arb_term(),
                kind in arb_term(),
            ) {
                let catalog = Catalog::new(entries);
                let query = CatalogQuery::new(&brand, &reference, &kind);
                let results = catalog.filter(&query);

                for result in &results {
                    prop_assert!(query.matches(result));
                }

                let matched: usize = catalog
                    .entries()
                    .iter()
                    .filter(|e| query.matches(e))
                    .count();
                prop_assert_eq!(results.len(), matched);
            }

            /// Property: result order is catalog order.
            #[test]
            fn filter_preserves_order(
                entries in proptest::collection::vec(arb_entry(), 0..40),
                brand in arb_term(),
            ) {
                let catalog = Catalog::new(entries);
                let results = catalog.filter(&CatalogQuery::new(&brand, "", ""));

                let mut last_index = 0usize;
                for result in results {
                    let index = catalog
                        .entries()
                        .iter()
                        .enumerate()
                        .position(|(i, e)| i >= last_index && e == result)
                        .unwrap();
                    last_index = index;
                }
            }
        }
    }
}
