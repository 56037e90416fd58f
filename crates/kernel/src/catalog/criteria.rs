//! Parsing raw catalog query parameters into validated criteria.
//!
//! Parameters arrive as strings so that malformed values surface as catalog
//! validation errors rather than extractor rejections.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use super::filter::CatalogFilter;
use super::pagination::PageRequest;
use super::service::CatalogSettings;
use super::sort::{SortError, SortSpec};

/// Raw `GET /api/products` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParams {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub featured: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("{param} must be a number, got '{value}'")]
    InvalidNumber { param: &'static str, value: String },

    #[error("{param} must be a positive integer, got '{value}'")]
    InvalidCount { param: &'static str, value: String },

    #[error("{param} must not contain NUL characters")]
    NulCharacter { param: &'static str },

    #[error(transparent)]
    Sort(#[from] SortError),
}

/// Validated catalog request: what to match, how to order it, which window.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCriteria {
    pub filter: CatalogFilter,
    pub sort: SortSpec,
    pub page: PageRequest,
}

impl CatalogCriteria {
    /// Parse and validate raw parameters.
    ///
    /// Empty strings count as absent. A `limit` above the configured maximum
    /// is capped, not rejected.
    pub fn from_params(
        params: &CatalogParams,
        settings: &CatalogSettings,
    ) -> Result<Self, CriteriaError> {
        let filter = CatalogFilter {
            category: term("category", &params.category)?,
            brand: term("brand", &params.brand)?,
            min_price: price("minPrice", &params.min_price)?,
            max_price: price("maxPrice", &params.max_price)?,
            featured: text(&params.featured).map(|v| v == "true"),
            search: term("search", &params.search)?,
        };

        let sort = match text(&params.sort) {
            Some(expr) => expr.parse()?,
            None => SortSpec::default(),
        };

        let page = count("page", &params.page)?.unwrap_or(1);
        let limit = page_size(
            &params.limit,
            settings.default_page_size,
            settings.max_page_size,
        )?;

        Ok(Self {
            filter,
            sort,
            page: PageRequest::new(page, limit),
        })
    }
}

/// Parse a `limit` parameter: default when absent, capped at `max`.
pub fn page_size(raw: &Option<String>, default: u32, max: u32) -> Result<u32, CriteriaError> {
    let requested = count("limit", raw)?.unwrap_or(default);
    if requested > max {
        tracing::warn!(
            requested = requested,
            max = max,
            "page size exceeds maximum, capping"
        );
        return Ok(max);
    }
    Ok(requested)
}

fn text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A text term compared against stored columns. Postgres text cannot hold NUL.
fn term(param: &'static str, raw: &Option<String>) -> Result<Option<String>, CriteriaError> {
    match text(raw) {
        Some(value) if value.contains('\0') => Err(CriteriaError::NulCharacter { param }),
        other => Ok(other),
    }
}

fn price(param: &'static str, raw: &Option<String>) -> Result<Option<Decimal>, CriteriaError> {
    text(raw)
        .map(|value| {
            Decimal::from_str(&value).map_err(|_| CriteriaError::InvalidNumber { param, value })
        })
        .transpose()
}

fn count(param: &'static str, raw: &Option<String>) -> Result<Option<u32>, CriteriaError> {
    text(raw)
        .map(|value| match value.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(CriteriaError::InvalidCount { param, value }),
        })
        .transpose()
}
