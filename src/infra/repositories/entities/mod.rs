//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod client;
pub mod client_product_category;
pub mod product_category;
