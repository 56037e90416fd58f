//! Product catalog reads.
//!
//! Request parameters are parsed into [`CatalogCriteria`], rendered to SQL by
//! [`CatalogQueryBuilder`] and executed by [`CatalogService`], which returns a
//! [`Page`] of products with navigation metadata.

pub mod criteria;
pub mod facet;
pub mod filter;
pub mod pagination;
pub mod query_builder;
pub mod service;
pub mod sort;

pub use criteria::{CatalogCriteria, CatalogParams, CriteriaError, page_size};
pub use facet::{Facet, FacetDimension};
pub use filter::CatalogFilter;
pub use pagination::{Page, PageMeta, PageRequest};
pub use query_builder::CatalogQueryBuilder;
pub use service::{CatalogService, CatalogSettings};
pub use sort::{SortError, SortField, SortKey, SortSpec};
