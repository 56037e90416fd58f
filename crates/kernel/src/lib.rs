//! FitHub Storefront Kernel Library
//!
//! Catalog reads, admin writes and the HTTP surface over them. The `fithub`
//! binary wraps this library with the server lifecycle and operator CLI.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
