//! Database models.

pub mod api_token;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

pub use api_token::{ApiToken, IssuedToken};
pub use order::{Order, RecentOrder};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use role::Role;
pub use user::{CreateUser, User};

use thiserror::Error;

/// Input rejected before it reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
