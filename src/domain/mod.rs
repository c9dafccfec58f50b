//! Domain layer - Core business entities and logic
//!
//! Client records, product categories and the value types used to
//! filter, sort and page client listings. Independent of persistence
//! and transport concerns (except error types).

pub mod category;
pub mod client;
pub mod listing;

pub use category::ProductCategory;
pub use client::{Client, ClientDetail, ClientExport, ClientRow, CreateClient, UpdateClient};
pub use listing::{ClientFilter, ClientListQuery, ClientSort, ClientSortField, SortOrder};
