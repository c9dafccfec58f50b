//! Product category repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::entities::client_product_category;
use super::entities::product_category::{self, ActiveModel, Entity as CategoryEntity};
use crate::domain::ProductCategory;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by display name
    async fn list(&self) -> AppResult<Vec<ProductCategory>>;

    /// Categories associated with a client, ordered by display name
    async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<ProductCategory>>;

    /// Create a category
    async fn create(&self, display_name: String) -> AppResult<ProductCategory>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn list(&self) -> AppResult<Vec<ProductCategory>> {
        list(&self.db).await
    }

    async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<ProductCategory>> {
        find_by_client(&self.db, client_id).await
    }

    async fn create(&self, display_name: String) -> AppResult<ProductCategory> {
        create(&self.db, display_name).await
    }
}

pub(crate) async fn list<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<ProductCategory>> {
    let models = CategoryEntity::find()
        .order_by_asc(product_category::Column::DisplayName)
        .all(conn)
        .await?;

    Ok(models.into_iter().map(ProductCategory::from).collect())
}

pub(crate) async fn find_by_client<C: ConnectionTrait>(
    conn: &C,
    client_id: Uuid,
) -> AppResult<Vec<ProductCategory>> {
    let models = CategoryEntity::find()
        .join(
            JoinType::InnerJoin,
            product_category::Relation::ClientProductCategories.def(),
        )
        .filter(client_product_category::Column::ClientId.eq(client_id))
        .order_by_asc(product_category::Column::DisplayName)
        .all(conn)
        .await?;

    Ok(models.into_iter().map(ProductCategory::from).collect())
}

/// Number of the given ids that name an existing category
pub(crate) async fn count_existing<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let count = CategoryEntity::find()
        .filter(product_category::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?;

    Ok(count)
}

pub(crate) async fn create<C: ConnectionTrait>(
    conn: &C,
    display_name: String,
) -> AppResult<ProductCategory> {
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        display_name: Set(display_name),
        created_at: Set(Utc::now()),
    };

    let model = active_model.insert(conn).await?;
    Ok(ProductCategory::from(model))
}
