//! Catalog facet filtering and category grouping.
//!
//! The shop page narrows the catalog with a per-dimension inclusion set:
//! within one dimension the selected values are OR-ed, across dimensions the
//! results are AND-ed, and a dimension with no selections passes everything.
//! The filtered set is then partitioned by category into a fixed, ordered
//! list of groups, each rendered only if non-empty.

use crate::product::Product;
use crate::types::{Category, Color, Size};

/// Facet selections for one render of the shop page.
///
/// An empty filter (no selections in any dimension) matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    pub categories: Vec<Category>,
}

impl FacetFilter {
    /// Build a filter from raw `(key, value)` query pairs.
    ///
    /// Keys are `color`, `size`, and `category` (repeated per selection).
    /// Unknown keys and unknown values are ignored rather than rejected, so
    /// a stale or hand-edited URL still renders the page.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "color" => {
                    if let Ok(color) = value.parse() {
                        filter.colors.push(color);
                    }
                }
                "size" => {
                    if let Ok(size) = value.parse() {
                        filter.sizes.push(size);
                    }
                }
                "category" => {
                    if let Ok(category) = value.parse() {
                        filter.categories.push(category);
                    }
                }
                _ => {}
            }
        }
        filter
    }

    /// Whether no dimension has any selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.sizes.is_empty() && self.categories.is_empty()
    }

    /// Whether a product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        (self.colors.is_empty() || self.colors.contains(&product.color))
            && (self.sizes.is_empty() || self.sizes.contains(&product.size))
            && (self.categories.is_empty() || self.categories.contains(&product.category))
    }

    /// Single-pass filter over the catalog, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// One non-empty category bucket of the filtered catalog.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub products: Vec<&'a Product>,
}

/// Partition filtered products by category in display order.
///
/// Categories with no matching products are omitted.
#[must_use]
pub fn group_by_category<'a>(products: &[&'a Product]) -> Vec<CategoryGroup<'a>> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let bucket: Vec<&Product> = products
                .iter()
                .copied()
                .filter(|p| p.category == category)
                .collect();
            if bucket.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category,
                    products: bucket,
                })
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::tests::sample_product;
    use crate::types::ProductId;

    fn catalog() -> Vec<Product> {
        vec![
            sample_product(1, Color::Red, Size::Small, Category::Latest),
            sample_product(2, Color::Red, Size::Large, Category::Sports),
            sample_product(3, Color::Black, Size::Small, Category::Sports),
            sample_product(4, Color::Brown, Size::Medium, Category::Casual),
        ]
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let products = catalog();
        let filter = FacetFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&products).len(), products.len());
    }

    #[test]
    fn test_and_across_dimensions_or_within() {
        let products = catalog();
        let filter = FacetFilter {
            colors: vec![Color::Red],
            sizes: vec![Size::Small],
            categories: vec![],
        };
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().id, ProductId::new(1));

        let filter = FacetFilter {
            colors: vec![Color::Red, Color::Black],
            sizes: vec![],
            categories: vec![],
        };
        assert_eq!(filter.apply(&products).len(), 3);
    }

    #[test]
    fn test_from_pairs_ignores_unknown_values() {
        let filter = FacetFilter::from_pairs([
            ("color", "red"),
            ("color", "chartreuse"),
            ("size", "small"),
            ("page", "2"),
        ]);
        assert_eq!(filter.colors, vec![Color::Red]);
        assert_eq!(filter.sizes, vec![Size::Small]);
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn test_grouping_skips_empty_buckets_and_keeps_order() {
        let products = catalog();
        let refs: Vec<&Product> = products.iter().collect();
        let groups = group_by_category(&refs);

        let order: Vec<Category> = groups.iter().map(|g| g.category).collect();
        assert_eq!(order, [Category::Latest, Category::Casual, Category::Sports]);

        let sports = groups.iter().find(|g| g.category == Category::Sports).unwrap();
        assert_eq!(sports.products.len(), 2);
    }

    #[test]
    fn test_grouping_of_filtered_set() {
        let products = catalog();
        let filter = FacetFilter {
            colors: vec![],
            sizes: vec![],
            categories: vec![Category::Sports],
        };
        let matched = filter.apply(&products);
        let groups = group_by_category(&matched);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.first().unwrap().category, Category::Sports);
    }
}
