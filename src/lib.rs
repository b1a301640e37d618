//! knjiznica-rs: a library catalog record service.
//!
//! Manages authors, categories and books in an embedded SQLite store and
//! exposes create/read/update/delete, search, sorting and statistics over
//! a JSON HTTP API.
//!
//! # Features
//!
//! - Field validation that reports every violated rule at once
//! - Natural-key uniqueness (author email, category name, ISBN)
//! - Referential integrity with restrict-on-delete
//! - Search, sort and foreign-key filters on list endpoints
//! - Live book counts and denormalized author/category names
//! - Statistics computed on demand

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Catalog service.
pub mod catalog;
/// Configuration and CLI.
pub mod config;
/// Database operations.
pub mod db;
/// Error types.
pub mod error;
/// Integrity rules.
pub mod integrity;
/// Search and sort.
pub mod query;
/// HTTP server.
pub mod server;
/// Statistics.
pub mod stats;
/// Payload validation.
pub mod validation;
/// Response shapes.
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use config::{Cli, Command, Config};
pub use db::Database;
pub use error::{AppError, Result};
pub use server::AppState;
