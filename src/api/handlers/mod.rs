//! HTTP request handlers.

pub mod category_handler;
pub mod client_handler;

pub use category_handler::category_routes;
pub use client_handler::client_routes;
