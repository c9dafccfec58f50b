//! API middleware.

mod caller;

pub use caller::{caller_middleware, Caller};
