//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `export` - Write the client workbook to disk
//! - `categories` - Product category maintenance

pub mod args;

pub use args::{Cli, Commands};
