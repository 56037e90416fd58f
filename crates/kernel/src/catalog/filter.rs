//! Catalog filter predicate.
//!
//! A [`CatalogFilter`] holds the constraints a shopper asked for. It renders
//! to a SeaQuery condition for the database and can also be evaluated
//! against a loaded [`Product`] with the same semantics.

use rust_decimal::Decimal;
use sea_query::extension::postgres::PgExpr;
use sea_query::{Cond, Expr, Iden};

use crate::models::Product;

/// Column identifiers for the `products` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Description,
    Category,
    Brand,
    Price,
    Stock,
    Featured,
    Rating,
    CreatedAt,
    UpdatedAt,
}

/// Constraints on the product collection. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact brand match.
    pub brand: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub featured: Option<bool>,
    /// Case-insensitive substring of name, description or brand.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Filter that only admits featured products.
    pub fn featured_only() -> Self {
        Self {
            featured: Some(true),
            ..Default::default()
        }
    }

    /// True when no term constrains the collection.
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.featured.is_none()
            && self.search.is_none()
    }

    /// Compose the WHERE condition. Returns `None` when nothing constrains.
    ///
    /// Terms are AND-ed; the three search columns are OR-ed inside one term.
    pub fn condition(&self) -> Option<Cond> {
        if self.is_unconstrained() {
            return None;
        }

        let mut cond = Cond::all();

        if let Some(ref category) = self.category {
            cond = cond.add(Expr::col(Products::Category).eq(category.as_str()));
        }
        if let Some(ref brand) = self.brand {
            cond = cond.add(Expr::col(Products::Brand).eq(brand.as_str()));
        }
        if let Some(min) = self.min_price {
            cond = cond.add(Expr::col(Products::Price).gte(min));
        }
        if let Some(max) = self.max_price {
            cond = cond.add(Expr::col(Products::Price).lte(max));
        }
        if let Some(featured) = self.featured {
            cond = cond.add(Expr::col(Products::Featured).eq(featured));
        }
        if let Some(ref term) = self.search {
            let pattern = format!("%{}%", escape_like_wildcards(term));
            cond = cond.add(
                Cond::any()
                    .add(Expr::col(Products::Name).ilike(pattern.clone()))
                    .add(Expr::col(Products::Description).ilike(pattern.clone()))
                    .add(Expr::col(Products::Brand).ilike(pattern)),
            );
        }

        Some(cond)
    }

    /// Evaluate the predicate against a loaded product.
    pub fn matches(&self, product: &Product) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|c| *c != product.category)
        {
            return false;
        }
        if self.brand.as_ref().is_some_and(|b| *b != product.brand) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.featured.is_some_and(|f| f != product.featured) {
            return false;
        }
        if let Some(ref term) = self.search {
            let needle = term.to_lowercase();
            let hit = [&product.name, &product.description, &product.brand]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
pub(crate) fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, description: &str, brand: &str, price: i64) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: description.to_string(),
            category: "cardio".to_string(),
            brand: brand.to_string(),
            price: Decimal::from(price),
            stock: 5,
            images: vec![],
            featured: false,
            rating: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn unconstrained_filter_has_no_condition() {
        let filter = CatalogFilter::default();
        assert!(filter.is_unconstrained());
        assert!(filter.condition().is_none());
        assert!(filter.matches(&product("Rope", "Speed rope", "Jumpy", 10)));
    }

    #[test]
    fn search_matches_any_text_field_case_insensitively() {
        let filter = CatalogFilter {
            search: Some("kalenjin".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&product("Kalenjin Running Shoes", "Trainers", "Stride", 120)));
        assert!(filter.matches(&product("Shoes", "Built for KALENJIN pace", "Stride", 120)));
        assert!(filter.matches(&product("Shoes", "Trainers", "Kalenjin", 120)));
        assert!(!filter.matches(&product("Shoes", "Trainers", "Stride", 120)));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = CatalogFilter {
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(200)),
            ..Default::default()
        };

        assert!(filter.matches(&product("A", "", "", 100)));
        assert!(filter.matches(&product("B", "", "", 200)));
        assert!(!filter.matches(&product("C", "", "", 99)));
        assert!(!filter.matches(&product("D", "", "", 201)));
    }

    #[test]
    fn single_bound_only_constrains_one_side() {
        let filter = CatalogFilter {
            min_price: Some(Decimal::from(100)),
            ..Default::default()
        };
        assert!(filter.matches(&product("A", "", "", 10_000)));
        assert!(!filter.matches(&product("B", "", "", 50)));
    }

    #[test]
    fn exact_terms_are_exact() {
        let filter = CatalogFilter {
            category: Some("cardio".to_string()),
            brand: Some("Stride".to_string()),
            featured: Some(false),
            ..Default::default()
        };
        assert!(filter.matches(&product("A", "", "Stride", 1)));
        assert!(!filter.matches(&product("A", "", "stride", 1)));

        let mut featured = product("A", "", "Stride", 1);
        featured.featured = true;
        assert!(!filter.matches(&featured));
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }
}
