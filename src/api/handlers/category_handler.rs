//! Product category handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::ProductCategory;
use crate::errors::AppResult;

/// Create product category routes
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// List product categories ordered by display name
#[utoipa::path(
    get,
    path = "/api/product-categories",
    tag = "Product Categories",
    responses(
        (status = 200, description = "All product categories", body = [ProductCategory])
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<ProductCategory>>> {
    let categories = state.client_service.list_categories().await?;
    Ok(Json(categories))
}
