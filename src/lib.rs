//! Client Registry - client registration with product categories
//!
//! Registers clients, associates them with product categories, serves a
//! searchable and sortable listing and exports it as a spreadsheet.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Clients, categories and listing inputs
//! - **services**: Application use cases
//! - **infra**: Database, repositories, unit of work and workbook rendering
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (paging, response envelope)
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
//! # Add a product category
//! cargo run -- categories add "Savings Account"
//!
//! # Write the client workbook to ./exports
//! cargo run -- export --output exports
//! ```

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
pub use domain::{Client, ClientDetail, ClientRow, ProductCategory};
pub use errors::{AppError, AppResult};
