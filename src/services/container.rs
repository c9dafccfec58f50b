//! Service Container - Centralized service access with parallel execution support.

use std::future::Future;
use std::sync::Arc;

use super::{ClientManager, ClientService};
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get client service
    fn clients(&self) -> Arc<dyn ClientService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    client_service: Arc<dyn ClientService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(client_service: Arc<dyn ClientService>) -> Self {
        Self { client_service }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let client_service = Arc::new(ClientManager::new(uow));

        Self { client_service }
    }
}

impl ServiceContainer for Services {
    fn clients(&self) -> Arc<dyn ClientService> {
        self.client_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    ///
    /// # Example
    /// ```ignore
    /// let (rows, total) = parallel::join2(
    ///     clients.find_rows(&filter, sort, page),
    ///     clients.count_rows(&filter),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
