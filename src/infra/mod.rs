//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over the client and category tables
//! - Unit of Work for transaction management
//! - Workbook rendering for exports

pub mod db;
pub mod repositories;
pub mod spreadsheet;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{CategoryRepository, CategoryStore, ClientRepository, ClientStore};
pub use spreadsheet::render_client_workbook;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCategoryRepository, MockClientRepository};
