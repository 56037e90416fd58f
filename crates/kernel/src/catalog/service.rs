//! Catalog service: executes the reads the query builder renders.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

use super::criteria::CatalogCriteria;
use super::facet::{Facet, FacetDimension, build_facet_query};
use super::filter::CatalogFilter;
use super::pagination::{Page, PageRequest};
use super::query_builder::CatalogQueryBuilder;
use super::sort::{SortField, SortKey, SortSpec};
use crate::config::Config;
use crate::models::Product;

/// Paging limits applied to catalog requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub featured_default_limit: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            featured_default_limit: 8,
        }
    }
}

impl From<&Config> for CatalogSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_page_size: config.catalog_default_page_size,
            max_page_size: config.catalog_max_page_size,
            featured_default_limit: config.featured_default_limit,
        }
    }
}

/// Catalog reads against the products table.
pub struct CatalogService {
    pool: PgPool,
    settings: CatalogSettings,
}

impl CatalogService {
    pub fn new(pool: PgPool, settings: CatalogSettings) -> Self {
        Self { pool, settings }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Fetch one page of matching products and the total match count.
    ///
    /// The window and the count are issued concurrently on separate
    /// connections; they are not read from one snapshot.
    pub async fn list(&self, criteria: &CatalogCriteria) -> Result<Page<Product>> {
        let builder = CatalogQueryBuilder::new(&criteria.filter, &criteria.sort);
        let list_sql = builder.build(criteria.page);
        let count_sql = builder.build_count();

        debug!(sql = %list_sql, "catalog window query");

        let (items, total) = tokio::try_join!(
            async {
                sqlx::query_as::<_, Product>(&list_sql)
                    .fetch_all(&self.pool)
                    .await
                    .context("failed to fetch catalog page")
            },
            async {
                sqlx::query_scalar::<_, i64>(&count_sql)
                    .fetch_one(&self.pool)
                    .await
                    .context("failed to count catalog matches")
            },
        )?;

        Ok(Page::new(
            items,
            criteria.page,
            u64::try_from(total).unwrap_or(0),
        ))
    }

    /// Highest-rated featured products, at most `limit`.
    pub async fn featured(&self, limit: u32) -> Result<Vec<Product>> {
        let filter = CatalogFilter::featured_only();
        let sort = SortSpec::single(SortKey::desc(SortField::Rating));
        let sql = CatalogQueryBuilder::new(&filter, &sort).build(PageRequest::new(1, limit));

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch featured products")?;

        Ok(products)
    }

    /// Group all products by a dimension.
    pub async fn facets(&self, dimension: FacetDimension) -> Result<Vec<Facet>> {
        let sql = build_facet_query(dimension);

        let facets = sqlx::query_as::<_, Facet>(&sql)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to aggregate {dimension:?} facets"))?;

        Ok(facets)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let config = Config {
            port: 5000,
            database_url: "postgres://localhost/fithub".to_string(),
            database_max_connections: 10,
            cors_allowed_origins: vec!["*".to_string()],
            catalog_default_page_size: 12,
            catalog_max_page_size: 48,
            featured_default_limit: 4,
            request_timeout: std::time::Duration::from_secs(30),
        };
        let settings = CatalogSettings::from(&config);
        assert_eq!(settings.default_page_size, 12);
        assert_eq!(settings.max_page_size, 48);
        assert_eq!(settings.featured_default_limit, 4);
    }
}
