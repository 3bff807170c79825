//! Picker filters for the order form.
//!
//! Both pickers recompute their candidate list from the full catalog on every
//! keystroke. Matching is case-insensitive throughout. The supplier picker matches
//! the typed letters in order, so "ace" finds both "Ace Hardware" and "Acme Foods";
//! any substring match is also an in-order match.

use crate::entities::{product, supplier};

/// Returns the suppliers whose name contains the letters of `query` in order, in
/// catalog order.
///
/// An empty query matches every supplier.
#[must_use]
pub fn filter_suppliers<'a>(
    suppliers: &'a [supplier::Model],
    query: &str,
) -> Vec<&'a supplier::Model> {
    let query_lower = query.trim().to_lowercase();

    suppliers
        .iter()
        .filter(|s| contains_in_order(&s.name.to_lowercase(), &query_lower))
        .collect()
}

/// Whether every char of `needle` appears in `haystack`, in the same order.
fn contains_in_order(haystack: &str, needle: &str) -> bool {
    let mut remaining = haystack.chars();
    needle.chars().all(|wanted| remaining.any(|c| c == wanted))
}

/// Returns the products sold by `supplier` whose name contains `query`.
///
/// The supplier must match exactly (ignoring case). Without a selected supplier the
/// product picker is disabled, so an empty `supplier` yields no candidates.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [product::Model],
    supplier: &str,
    query: &str,
) -> Vec<&'a product::Model> {
    let supplier_lower = supplier.trim().to_lowercase();
    if supplier_lower.is_empty() {
        return Vec::new();
    }

    let query_lower = query.trim().to_lowercase();

    products
        .iter()
        .filter(|p| p.supplier.to_lowercase() == supplier_lower)
        .filter(|p| p.name.to_lowercase().contains(&query_lower))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_product, sample_supplier};
    use rust_decimal_macros::dec;

    fn supplier_names(found: &[&supplier::Model]) -> Vec<String> {
        found.iter().map(|s| s.name.clone()).collect()
    }

    fn product_names(found: &[&product::Model]) -> Vec<String> {
        found.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_supplier_search_matches_letters_in_order() {
        let suppliers = vec![
            sample_supplier(1, "Acme Foods"),
            sample_supplier(2, "Ace Hardware"),
            sample_supplier(3, "Best Co"),
        ];

        let found = filter_suppliers(&suppliers, "Ace");
        assert_eq!(
            supplier_names(&found),
            vec!["Acme Foods", "Ace Hardware"]
        );

        let found = filter_suppliers(&suppliers, "best");
        assert_eq!(supplier_names(&found), vec!["Best Co"]);

        // Plain substrings still match
        let found = filter_suppliers(&suppliers, "HARD");
        assert_eq!(supplier_names(&found), vec!["Ace Hardware"]);

        // Letters out of order do not
        assert!(filter_suppliers(&suppliers, "eca").is_empty());

        assert_eq!(filter_suppliers(&suppliers, "").len(), 3);
        assert!(filter_suppliers(&suppliers, "zzz").is_empty());
    }

    #[test]
    fn test_contains_in_order() {
        assert!(contains_in_order("acme foods", "ace"));
        assert!(contains_in_order("acme foods", ""));
        assert!(contains_in_order("acme foods", "foods"));
        assert!(!contains_in_order("acme foods", "sofa"));
        assert!(!contains_in_order("", "a"));
    }

    #[test]
    fn test_products_restricted_to_supplier() {
        let products = vec![
            sample_product(1, "Flour", dec!(10), "Acme Foods"),
            sample_product(2, "Sugar", dec!(8), "acme foods"),
            sample_product(3, "Hammer", dec!(25), "Ace Hardware"),
            sample_product(4, "Flour Sifter", dec!(12), "Ace Hardware"),
        ];

        let found = filter_products(&products, "ACME FOODS", "");
        assert_eq!(product_names(&found), vec!["Flour", "Sugar"]);

        let found = filter_products(&products, "Ace Hardware", "flour");
        assert_eq!(product_names(&found), vec!["Flour Sifter"]);

        // Prefix of a supplier name is not a match
        assert!(filter_products(&products, "Acme", "").is_empty());
    }

    #[test]
    fn test_products_disabled_without_supplier() {
        let products = vec![sample_product(1, "Flour", dec!(10), "Acme Foods")];
        assert!(filter_products(&products, "", "").is_empty());
        assert!(filter_products(&products, "   ", "flour").is_empty());
    }
}
