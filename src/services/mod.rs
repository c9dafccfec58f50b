//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure through the
//! Unit of Work and depend on its trait rather than on concrete stores.

mod client_service;
pub mod container;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use client_service::{ClientManager, ClientService};

// Parallel execution utilities
pub use container::parallel;
