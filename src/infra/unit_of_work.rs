//! Unit of Work pattern implementation.
//!
//! Registration, update and removal touch a client and its category
//! associations together; the unit of work runs them in one transaction
//! that is committed on success and rolled back on error.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    category_repository, client_category_repository, client_repository, CategoryLink,
    CategoryRepository, CategoryStore, ClientRepository, ClientStore,
};
use crate::domain::Client;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly due to the generic transaction method.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Read-side client repository
    fn clients(&self) -> Arc<dyn ClientRepository>;

    /// Read-side category repository
    fn categories(&self) -> Arc<dyn CategoryRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn clients(&self) -> TxClientRepository<'_> {
        TxClientRepository { txn: self.txn }
    }

    pub fn categories(&self) -> TxCategoryRepository<'_> {
        TxCategoryRepository { txn: self.txn }
    }

    pub fn client_categories(&self) -> TxClientCategoryRepository<'_> {
        TxClientCategoryRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    client_repo: Arc<ClientStore>,
    category_repo: Arc<CategoryStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let client_repo = Arc::new(ClientStore::new(db.clone()));
        let category_repo = Arc::new(CategoryStore::new(db.clone()));
        Self {
            db,
            client_repo,
            category_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.client_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware client repository.
pub struct TxClientRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxClientRepository<'_> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        client_repository::find_by_id(self.txn, id).await
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        client_repository::email_exists(self.txn, email).await
    }

    /// Whether a client other than `except` uses the phone number
    pub async fn phone_taken(&self, phone_number: &str, except: Option<Uuid>) -> AppResult<bool> {
        client_repository::phone_taken(self.txn, phone_number, except).await
    }

    pub async fn next_client_number(&self) -> AppResult<i32> {
        client_repository::next_client_number(self.txn).await
    }

    pub async fn insert(&self, client: &Client) -> AppResult<()> {
        client_repository::insert(self.txn, client).await
    }

    pub async fn update(&self, client: &Client) -> AppResult<()> {
        client_repository::update(self.txn, client).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        client_repository::delete(self.txn, id).await
    }
}

/// Transaction-aware category repository.
pub struct TxCategoryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCategoryRepository<'_> {
    /// Number of the given ids that name an existing category
    pub async fn count_existing(&self, ids: &[Uuid]) -> AppResult<u64> {
        category_repository::count_existing(self.txn, ids).await
    }
}

/// Transaction-aware client–category association repository.
pub struct TxClientCategoryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxClientCategoryRepository<'_> {
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<CategoryLink>> {
        client_category_repository::find_by_client(self.txn, client_id).await
    }

    pub async fn insert_many(&self, client_id: Uuid, category_ids: &[Uuid]) -> AppResult<()> {
        client_category_repository::insert_many(self.txn, client_id, category_ids).await
    }

    pub async fn delete_by_ids(&self, ids: &[Uuid]) -> AppResult<u64> {
        client_category_repository::delete_by_ids(self.txn, ids).await
    }

    pub async fn delete_by_client(&self, client_id: Uuid) -> AppResult<u64> {
        client_category_repository::delete_by_client(self.txn, client_id).await
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
