//! Client registration handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::XLSX_CONTENT_TYPE;
use crate::domain::{ClientDetail, ClientListQuery, ClientRow, CreateClient, UpdateClient};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, PagedClientRows, PagedResult};

/// Create client routes
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/export", get(export_clients))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

/// Register a new client
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClient,
    responses(
        (status = 200, description = "Client registered"),
        (status = 400, description = "Validation error, unknown category, duplicate email or phone")
    )
)]
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateClient>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client_service.create_client(payload).await?;

    Ok(Json(ApiResponse::message(
        "New client details added successfully",
    )))
}

/// List client–category rows with search, category filter, sorting and paging
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "One page of rows", body = PagedClientRows),
        (status = 400, description = "Unknown sort field or order")
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> AppResult<Json<PagedResult<ClientRow>>> {
    let (filter, sort, page) = query.into_parts()?;
    let rows = state
        .client_service
        .list_clients(filter, sort, page)
        .await?;

    Ok(Json(rows))
}

/// Download every client–category row as an `.xlsx` workbook
#[utoipa::path(
    get,
    path = "/api/clients/export",
    tag = "Clients",
    responses(
        (status = 200, description = "Workbook attachment", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    )
)]
pub async fn export_clients(State(state): State<AppState>) -> AppResult<(HeaderMap, Vec<u8>)> {
    let export = state.client_service.export_clients().await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::internal(format!("Invalid export file name: {}", e)))?,
    );

    Ok((headers, export.content))
}

/// Get a client with all its product categories
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = ClientDetail),
        (status = 400, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ClientDetail>> {
    let client = state.client_service.get_client(id).await?;
    Ok(Json(client))
}

/// Update a client's contact details and category selection
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated"),
        (status = 400, description = "Validation error, unknown client or category, duplicate phone")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateClient>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client_service.update_client(id, payload).await?;

    Ok(Json(ApiResponse::message(
        "Client details updated successfully",
    )))
}

/// Delete a client and its category associations
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 400, description = "Client not found")
    )
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.client_service.delete_client(id).await?;

    Ok(Json(ApiResponse::message("Client deleted successfully")))
}
