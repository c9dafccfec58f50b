//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Client Registry - client registration with product categories
#[derive(Parser, Debug)]
#[command(name = "client-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Write the client workbook to disk
    Export(ExportArgs),

    /// Manage product categories
    Categories(CategoriesArgs),
}

/// Arguments for the serve command
///
/// Unset values fall back to `SERVER_HOST` / `SERVER_PORT` from the configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Directory the workbook is written to
    #[arg(short, long, default_value = ".", env = "EXPORT_DIR")]
    pub output: PathBuf,
}

/// Arguments for the categories command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

/// Product category actions
#[derive(Subcommand, Debug)]
pub enum CategoriesAction {
    /// Add a product category
    Add {
        /// Display name (e.g., "Savings Account")
        name: String,
    },
    /// List product categories
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_categories_add() {
        let cli = Cli::try_parse_from(["client-registry", "categories", "add", "Savings"]).unwrap();
        match cli.command {
            Commands::Categories(CategoriesArgs {
                action: CategoriesAction::Add { name },
            }) => assert_eq!(name, "Savings"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn serve_flags_are_optional() {
        let cli = Cli::try_parse_from(["client-registry", "-v", "serve", "--port", "8080"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, None);
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
