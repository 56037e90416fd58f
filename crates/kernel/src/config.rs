//! Configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 5000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Catalog page size used when a request omits `limit` (default: 20).
    pub catalog_default_page_size: u32,

    /// Upper bound for any requested page size (default: 100).
    pub catalog_max_page_size: u32,

    /// Featured listing size used when a request omits `limit` (default: 8).
    pub featured_default_limit: u32,

    /// Per-request timeout applied by the HTTP stack (default: 30s).
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = parse_var("PORT", 5000)?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let catalog_default_page_size = parse_var("CATALOG_DEFAULT_PAGE_SIZE", 20)?;
        let catalog_max_page_size = parse_var("CATALOG_MAX_PAGE_SIZE", 100)?;
        let featured_default_limit = parse_var("FEATURED_DEFAULT_LIMIT", 8)?;
        let request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?);

        let config = Self {
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            catalog_default_page_size,
            catalog_max_page_size,
            featured_default_limit,
            request_timeout,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject page-size settings the catalog cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.catalog_max_page_size == 0 {
            anyhow::bail!("CATALOG_MAX_PAGE_SIZE must be at least 1");
        }
        if self.catalog_default_page_size == 0
            || self.catalog_default_page_size > self.catalog_max_page_size
        {
            anyhow::bail!(
                "CATALOG_DEFAULT_PAGE_SIZE must be between 1 and {}",
                self.catalog_max_page_size
            );
        }
        if self.featured_default_limit == 0 {
            anyhow::bail!("FEATURED_DEFAULT_LIMIT must be at least 1");
        }
        Ok(())
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
