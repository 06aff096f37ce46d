//! Finance Tracker - personal finance backend
//!
//! Multi-user ledger of incomes, expenses, budgets, savings, bills and
//! savings targets, with server-side reports and JSON backups.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Ledger records, months, currencies and passwords
//! - **analytics**: Pure report calculations
//! - **services**: Application use cases and business logic
//! - **infra**: Database, Redis and the Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared request and response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Print a report
//! cargo run -- report --username alice --month 2024-05 --currency USD
//! ```

pub mod analytics;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
