//! Repository layer - Data access abstraction
//!
//! Each repository module exposes connection-generic query functions,
//! shared by the pool-backed stores below and the transaction-scoped
//! repositories of the unit of work.

pub(crate) mod category_repository;
pub(crate) mod client_category_repository;
pub(crate) mod client_repository;
pub(crate) mod entities;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use client_category_repository::CategoryLink;
pub use client_repository::{ClientRepository, ClientStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
