//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{ClientService, ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Client registration, listing and export
    pub client_service: Arc<dyn ClientService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the service container over the database connection.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());

        Self {
            client_service: container.clients(),
            database,
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(client_service: Arc<dyn ClientService>, database: Arc<Database>) -> Self {
        Self {
            client_service,
            database,
        }
    }
}
