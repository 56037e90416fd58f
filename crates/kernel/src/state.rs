//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::catalog::{CatalogService, CatalogSettings};
use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Catalog reads.
    catalog: CatalogService,
}

impl AppState {
    /// Connect to PostgreSQL, apply migrations and build the state.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;
        info!("Connected to PostgreSQL");

        db::run_migrations(&db)
            .await
            .context("failed to run migrations")?;
        info!("Database migrations complete");

        Ok(Self::from_pool(db, CatalogSettings::from(config)))
    }

    /// Build state around an existing pool.
    pub fn from_pool(db: PgPool, settings: CatalogSettings) -> Self {
        let catalog = CatalogService::new(db.clone(), settings);
        Self {
            inner: Arc::new(AppStateInner { db, catalog }),
        }
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the catalog service.
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Check if PostgreSQL is reachable.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
