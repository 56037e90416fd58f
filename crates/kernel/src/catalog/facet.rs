//! Category and brand facets.

use rust_decimal::Decimal;
use sea_query::{Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query};
use serde::Serialize;

use super::filter::Products;

/// Grouping dimension for a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    Category,
    Brand,
}

impl FacetDimension {
    fn column(self) -> Products {
        match self {
            FacetDimension::Category => Products::Category,
            FacetDimension::Brand => Products::Brand,
        }
    }

    /// Only category facets carry an average price.
    fn with_avg_price(self) -> bool {
        matches!(self, FacetDimension::Category)
    }
}

/// One group of a facet. `count` is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    #[serde(rename = "_id")]
    pub key: String,
    pub count: i64,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Decimal>,
}

/// Build the GROUP BY query for a dimension, largest group first.
pub fn build_facet_query(dimension: FacetDimension) -> String {
    let column = dimension.column();
    let mut query = Query::select();

    query
        .expr_as(Expr::col(column), Alias::new("key"))
        .expr_as(Expr::col(Asterisk).count(), Alias::new("count"));

    if dimension.with_avg_price() {
        query.expr_as(
            Expr::cust("ROUND(AVG(\"price\"), 2)"),
            Alias::new("avg_price"),
        );
    }

    query
        .from(Products::Table)
        .group_by_col(column)
        .order_by(Alias::new("count"), Order::Desc)
        .order_by(Alias::new("key"), Order::Asc);

    query.to_string(PostgresQueryBuilder)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn category_facet_query() {
        let sql = build_facet_query(FacetDimension::Category);

        assert!(sql.contains("\"category\" AS \"key\""));
        assert!(sql.contains("COUNT(*) AS \"count\""));
        assert!(sql.contains("AVG(\"price\")"));
        assert!(sql.contains("GROUP BY \"category\""));
        assert!(sql.contains("ORDER BY \"count\" DESC, \"key\" ASC"));
    }

    #[test]
    fn brand_facet_has_no_average() {
        let sql = build_facet_query(FacetDimension::Brand);

        assert!(sql.contains("GROUP BY \"brand\""));
        assert!(!sql.contains("AVG"));
    }

    #[test]
    fn facet_serializes_with_storefront_keys() {
        let category = Facet {
            key: "cardio".to_string(),
            count: 3,
            avg_price: Some(Decimal::new(4950, 2)),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "_id": "cardio", "count": 3, "avgPrice": 49.5 })
        );

        let brand = Facet {
            key: "Stride".to_string(),
            count: 2,
            avg_price: None,
        };
        let json = serde_json::to_value(&brand).unwrap();
        assert_eq!(json, serde_json::json!({ "_id": "Stride", "count": 2 }));
    }
}
