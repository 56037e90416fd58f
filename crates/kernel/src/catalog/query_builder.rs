//! Catalog query builder using SeaQuery.
//!
//! Renders the windowed list read and the count read for one set of
//! criteria. Both reads share the same WHERE clause.

use sea_query::{Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement};

use super::filter::{CatalogFilter, Products};
use super::pagination::PageRequest;
use super::sort::SortSpec;

/// Query builder for catalog reads.
pub struct CatalogQueryBuilder<'a> {
    filter: &'a CatalogFilter,
    sort: &'a SortSpec,
}

impl<'a> CatalogQueryBuilder<'a> {
    pub fn new(filter: &'a CatalogFilter, sort: &'a SortSpec) -> Self {
        Self { filter, sort }
    }

    /// Build the sorted, windowed SELECT.
    pub fn build(&self, page: PageRequest) -> String {
        let mut query = Query::select();

        query.column(Asterisk).from(Products::Table);

        self.add_filter(&mut query);
        self.add_sorts(&mut query);

        query.limit(u64::from(page.limit()));
        query.offset(page.offset());

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT query over the same filter.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query
            .expr(Expr::col(Asterisk).count())
            .from(Products::Table);

        self.add_filter(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    fn add_filter(&self, query: &mut SelectStatement) {
        if let Some(cond) = self.filter.condition() {
            query.cond_where(cond);
        }
    }

    /// ORDER BY the requested keys, then id so equal keys page stably.
    fn add_sorts(&self, query: &mut SelectStatement) {
        for key in self.sort.keys() {
            query.order_by(key.field.column(), key.order());
        }
        query.order_by(Products::Id, Order::Asc);
    }
}
