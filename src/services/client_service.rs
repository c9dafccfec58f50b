//! Client service - Registration, maintenance, listing and export of clients.
//!
//! Writes go through the unit of work so a client and its category
//! associations change together.

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::config::{EXPORT_FILE_PREFIX, EXPORT_TIMESTAMP_FORMAT};
use crate::domain::{
    Client, ClientDetail, ClientExport, ClientFilter, ClientRow, ClientSort, CreateClient,
    ProductCategory, UpdateClient,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{render_client_workbook, TransactionContext, UnitOfWork};
use crate::types::{PageRequest, PagedResult};
use crate::with_transaction;

/// Client service trait for dependency injection.
#[async_trait]
pub trait ClientService: Send + Sync {
    /// Register a client with its category selection
    async fn create_client(&self, input: CreateClient) -> AppResult<Client>;

    /// Client with every associated category
    async fn get_client(&self, id: Uuid) -> AppResult<ClientDetail>;

    /// Replace contact fields and the category selection
    async fn update_client(&self, id: Uuid, input: UpdateClient) -> AppResult<()>;

    /// Remove a client and its category associations
    async fn delete_client(&self, id: Uuid) -> AppResult<()>;

    /// One page of client–category rows plus the total matching row count
    async fn list_clients(
        &self,
        filter: ClientFilter,
        sort: ClientSort,
        page: PageRequest,
    ) -> AppResult<PagedResult<ClientRow>>;

    /// Render every client–category row into a workbook
    async fn export_clients(&self) -> AppResult<ClientExport>;

    /// All product categories ordered by display name
    async fn list_categories(&self) -> AppResult<Vec<ProductCategory>>;
}

/// Concrete implementation of ClientService using Unit of Work.
pub struct ClientManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ClientManager<U> {
    /// Create new client service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Fails with `CategoryNotFound` unless every id names a stored category.
async fn ensure_categories_exist(ctx: &TransactionContext<'_>, ids: &[Uuid]) -> AppResult<()> {
    let found = ctx.categories().count_existing(ids).await?;
    if found != ids.len() as u64 {
        return Err(AppError::CategoryNotFound);
    }
    Ok(())
}

fn log_failure(operation: &'static str) -> impl Fn(&AppError) {
    move |e| {
        if e.is_user_facing() {
            tracing::warn!(operation, error = %e, "Client operation rejected");
        } else {
            tracing::error!(operation, error = ?e, "Client operation failed");
        }
    }
}

fn export_file_name() -> String {
    format!(
        "{}-{}.xlsx",
        EXPORT_FILE_PREFIX,
        Local::now().format(EXPORT_TIMESTAMP_FORMAT)
    )
}

#[async_trait]
impl<U: UnitOfWork> ClientService for ClientManager<U> {
    async fn create_client(&self, input: CreateClient) -> AppResult<Client> {
        tracing::info!(email = %input.email, "Registering client");

        let result: AppResult<Client> = with_transaction!(self.uow, |ctx| {
            let selection = input.category_selection();
            ensure_categories_exist(&ctx, &selection).await?;

            if ctx.clients().email_exists(&input.email).await? {
                return Err(AppError::DuplicateEmail);
            }
            if ctx.clients().phone_taken(&input.phone_number, None).await? {
                return Err(AppError::DuplicatePhone);
            }

            let client_number = ctx.clients().next_client_number().await?;
            let client = Client::register(client_number, input);
            ctx.clients().insert(&client).await?;
            ctx.client_categories()
                .insert_many(client.id, &selection)
                .await?;

            Ok(client)
        });

        let client = result.inspect_err(log_failure("create_client"))?;
        tracing::info!(
            client_id = %client.id,
            client_number = client.client_number,
            "Client registered"
        );
        Ok(client)
    }

    async fn get_client(&self, id: Uuid) -> AppResult<ClientDetail> {
        tracing::debug!(client_id = %id, "Fetching client");

        let result = async {
            let client = self.uow.clients().find_by_id(id).await?.ok_or_client_not_found()?;
            let categories = self.uow.categories().find_by_client(id).await?;
            Ok::<_, AppError>(ClientDetail::new(client, categories))
        }
        .await;

        result.inspect_err(log_failure("get_client"))
    }

    async fn update_client(&self, id: Uuid, input: UpdateClient) -> AppResult<()> {
        tracing::info!(client_id = %id, "Updating client");

        let result: AppResult<()> = with_transaction!(self.uow, |ctx| {
            let mut client = ctx.clients().find_by_id(id).await?.ok_or_client_not_found()?;

            let selection = input.category_selection();
            ensure_categories_exist(&ctx, &selection).await?;
            if ctx
                .clients()
                .phone_taken(&input.phone_number, Some(id))
                .await?
            {
                return Err(AppError::DuplicatePhone);
            }

            client.apply(input);
            ctx.clients().update(&client).await?;

            let current = ctx.client_categories().find_by_client(id).await?;
            let removed: Vec<Uuid> = current
                .iter()
                .filter(|link| !selection.contains(&link.product_category_id))
                .map(|link| link.id)
                .collect();
            let added: Vec<Uuid> = selection
                .iter()
                .copied()
                .filter(|category_id| {
                    !current
                        .iter()
                        .any(|link| link.product_category_id == *category_id)
                })
                .collect();

            ctx.client_categories().delete_by_ids(&removed).await?;
            ctx.client_categories().insert_many(id, &added).await?;

            tracing::debug!(
                client_id = %id,
                removed = removed.len(),
                added = added.len(),
                "Category selection updated"
            );
            Ok(())
        });

        result.inspect_err(log_failure("update_client"))?;
        tracing::info!(client_id = %id, "Client updated");
        Ok(())
    }

    async fn delete_client(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(client_id = %id, "Deleting client");

        let result: AppResult<()> = with_transaction!(self.uow, |ctx| {
            ctx.clients().find_by_id(id).await?.ok_or_client_not_found()?;
            ctx.client_categories().delete_by_client(id).await?;
            ctx.clients().delete(id).await
        });

        result.inspect_err(log_failure("delete_client"))?;
        tracing::info!(client_id = %id, "Client deleted");
        Ok(())
    }

    async fn list_clients(
        &self,
        filter: ClientFilter,
        sort: ClientSort,
        page: PageRequest,
    ) -> AppResult<PagedResult<ClientRow>> {
        tracing::debug!(?filter, ?sort, ?page, "Listing clients");

        let clients = self.uow.clients();
        let (items, total_count) = parallel::join2(
            clients.find_rows(&filter, sort, page),
            clients.count_rows(&filter),
        )
        .await
        .inspect_err(log_failure("list_clients"))?;

        Ok(PagedResult::new(items, total_count))
    }

    async fn export_clients(&self) -> AppResult<ClientExport> {
        tracing::info!("Exporting clients");

        let result = async {
            let rows = self.uow.clients().find_all_rows(ClientSort::default()).await?;
            let row_count = rows.len();

            let content = tokio::task::spawn_blocking(move || render_client_workbook(&rows))
                .await
                .map_err(|e| AppError::internal(format!("Workbook rendering task failed: {}", e)))??;

            tracing::info!(rows = row_count, bytes = content.len(), "Client workbook rendered");
            Ok::<_, AppError>(ClientExport {
                file_name: export_file_name(),
                content,
            })
        }
        .await;

        result.inspect_err(log_failure("export_clients"))
    }

    async fn list_categories(&self) -> AppResult<Vec<ProductCategory>> {
        self.uow
            .categories()
            .list()
            .await
            .inspect_err(log_failure("list_categories"))
    }
}
