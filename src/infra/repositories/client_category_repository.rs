//! Client–category join rows.
//!
//! Join rows are only written inside a unit-of-work transaction, so this
//! module exposes connection-generic functions and no pool-backed store.

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::entities::client_product_category::{self, ActiveModel, Entity as LinkEntity};
use crate::errors::AppResult;

/// One stored client–category association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLink {
    pub id: Uuid,
    pub product_category_id: Uuid,
}

impl From<client_product_category::Model> for CategoryLink {
    fn from(model: client_product_category::Model) -> Self {
        Self {
            id: model.id,
            product_category_id: model.product_category_id,
        }
    }
}

pub(crate) async fn find_by_client<C: ConnectionTrait>(
    conn: &C,
    client_id: Uuid,
) -> AppResult<Vec<CategoryLink>> {
    let models = LinkEntity::find()
        .filter(client_product_category::Column::ClientId.eq(client_id))
        .order_by_asc(client_product_category::Column::CreatedAt)
        .all(conn)
        .await?;

    Ok(models.into_iter().map(CategoryLink::from).collect())
}

pub(crate) async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    client_id: Uuid,
    category_ids: &[Uuid],
) -> AppResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let now = Utc::now();
    let rows = category_ids.iter().map(|category_id| ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        product_category_id: Set(*category_id),
        created_at: Set(now),
    });

    LinkEntity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

pub(crate) async fn delete_by_ids<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = LinkEntity::delete_many()
        .filter(client_product_category::Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

pub(crate) async fn delete_by_client<C: ConnectionTrait>(conn: &C, client_id: Uuid) -> AppResult<u64> {
    let result = LinkEntity::delete_many()
        .filter(client_product_category::Column::ClientId.eq(client_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
