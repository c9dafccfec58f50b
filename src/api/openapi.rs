//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{category_handler, client_handler};
use crate::domain::{ClientDetail, ClientRow, CreateClient, ProductCategory, UpdateClient};
use crate::types::PagedClientRows;

/// OpenAPI documentation for the client registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Client Registry",
        version = "0.1.0",
        description = "Client registration with product categories, searchable listing and spreadsheet export",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Client endpoints
        client_handler::create_client,
        client_handler::list_clients,
        client_handler::export_clients,
        client_handler::get_client,
        client_handler::update_client,
        client_handler::delete_client,
        // Category endpoints
        category_handler::list_categories,
    ),
    components(
        schemas(
            CreateClient,
            UpdateClient,
            ClientDetail,
            ClientRow,
            ProductCategory,
            PagedClientRows,
        )
    ),
    tags(
        (name = "Clients", description = "Client registration and maintenance"),
        (name = "Product Categories", description = "Product category lookup")
    )
)]
pub struct ApiDoc;
