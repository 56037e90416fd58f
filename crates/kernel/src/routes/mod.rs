//! HTTP route handlers.

pub mod admin;
pub mod health;
pub mod helpers;
pub mod product;
