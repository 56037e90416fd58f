//! Catalog sort keys.
//!
//! A sort expression is a comma- or space-separated list of fields, each
//! optionally prefixed with `-` for descending: `-rating,price`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use sea_query::Order;
use thiserror::Error;

use super::filter::Products;
use crate::models::Product;

/// Fields a shopper may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Price,
    Rating,
    Name,
    Stock,
}

impl SortField {
    /// Wire name used in the `sort` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::Name => "name",
            SortField::Stock => "stock",
        }
    }

    pub(crate) fn column(self) -> Products {
        match self {
            SortField::CreatedAt => Products::CreatedAt,
            SortField::UpdatedAt => Products::UpdatedAt,
            SortField::Price => Products::Price,
            SortField::Rating => Products::Rating,
            SortField::Name => Products::Name,
            SortField::Stock => Products::Stock,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Stock => a.stock.cmp(&b.stock),
        }
    }
}

impl FromStr for SortField {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "name" => Ok(SortField::Name),
            "stock" => Ok(SortField::Stock),
            other => Err(SortError::UnknownField(other.to_string())),
        }
    }
}

/// One field of a sort expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub(crate) fn order(self) -> Order {
        if self.descending {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("unknown sort field '{0}' (allowed: createdAt, updatedAt, price, rating, name, stock)")]
    UnknownField(String),
}

/// Ordered list of sort keys. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Sort by a single key.
    pub fn single(key: SortKey) -> Self {
        Self { keys: vec![key] }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two products the way the database orders them, id last.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.keys
            .iter()
            .map(|key| {
                let ord = key.field.compare(a, b);
                if key.descending { ord.reverse() } else { ord }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

/// Newest first.
impl Default for SortSpec {
    fn default() -> Self {
        Self::single(SortKey::desc(SortField::CreatedAt))
    }
}

impl FromStr for SortSpec {
    type Err = SortError;

    /// Parse a sort expression. Blank input yields the default; a repeated
    /// field keeps its first occurrence.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys: Vec<SortKey> = Vec::new();

        for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let (descending, name) = match token.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, token.strip_prefix('+').unwrap_or(token)),
            };
            let field: SortField = name.parse()?;
            if keys.iter().any(|k| k.field == field) {
                continue;
            }
            keys.push(SortKey { field, descending });
        }

        if keys.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { keys })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if key.descending {
                f.write_str("-")?;
            }
            f.write_str(key.field.as_str())?;
        }
        Ok(())
    }
}
