//! Shared types used across the API and service layers.

mod pagination;
mod response;

pub use pagination::{PageRequest, PagedClientRows, PagedResult};
pub use response::ApiResponse;
