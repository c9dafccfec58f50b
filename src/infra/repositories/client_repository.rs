//! Client repository.
//!
//! Listing queries left-join clients to their category associations, so a
//! client with N categories produces N rows and a client with none produces
//! one row with empty category columns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, BinOper, Condition, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, FromQueryResult, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::client::{self, ActiveModel, Entity as ClientEntity};
use super::entities::{client_product_category, product_category};
use crate::config::FIRST_CLIENT_NUMBER;
use crate::domain::{Client, ClientFilter, ClientRow, ClientSort, ClientSortField, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const LIKE_ESCAPE: char = '!';

/// Client repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>>;

    /// One page of filtered, sorted listing rows
    async fn find_rows(
        &self,
        filter: &ClientFilter,
        sort: ClientSort,
        page: PageRequest,
    ) -> AppResult<Vec<ClientRow>>;

    /// Every listing row, unfiltered
    async fn find_all_rows(&self, sort: ClientSort) -> AppResult<Vec<ClientRow>>;

    /// Number of listing rows matching the filter
    async fn count_rows(&self, filter: &ClientFilter) -> AppResult<u64>;
}

/// Concrete implementation of ClientRepository
pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        find_by_id(&self.db, id).await
    }

    async fn find_rows(
        &self,
        filter: &ClientFilter,
        sort: ClientSort,
        page: PageRequest,
    ) -> AppResult<Vec<ClientRow>> {
        let rows = rows_query(filter, sort)
            .offset(page.offset())
            .limit(page.limit())
            .into_model::<ClientRowModel>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ClientRow::from).collect())
    }

    async fn find_all_rows(&self, sort: ClientSort) -> AppResult<Vec<ClientRow>> {
        let rows = rows_query(&ClientFilter::default(), sort)
            .into_model::<ClientRowModel>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ClientRow::from).collect())
    }

    async fn count_rows(&self, filter: &ClientFilter) -> AppResult<u64> {
        let total = joined_query(filter).count(&self.db).await?;
        Ok(total)
    }
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Client>> {
    let model = ClientEntity::find_by_id(id).one(conn).await?;
    Ok(model.map(Client::from))
}

pub(crate) async fn email_exists<C: ConnectionTrait>(conn: &C, email: &str) -> AppResult<bool> {
    let count = ClientEntity::find()
        .filter(client::Column::Email.eq(email))
        .count(conn)
        .await?;

    Ok(count > 0)
}

/// Whether another client already uses `phone_number`
pub(crate) async fn phone_taken<C: ConnectionTrait>(
    conn: &C,
    phone_number: &str,
    except: Option<Uuid>,
) -> AppResult<bool> {
    let mut query = ClientEntity::find().filter(client::Column::PhoneNumber.eq(phone_number));
    if let Some(id) = except {
        query = query.filter(client::Column::Id.ne(id));
    }

    Ok(query.count(conn).await? > 0)
}

/// One past the highest issued client number, or the first number on an empty table
pub(crate) async fn next_client_number<C: ConnectionTrait>(conn: &C) -> AppResult<i32> {
    let max_number = ClientEntity::find()
        .select_only()
        .column_as(client::Column::ClientNumber.max(), "max_number")
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?
        .flatten();

    Ok(max_number.map_or(FIRST_CLIENT_NUMBER, |n| n + 1))
}

pub(crate) async fn insert<C: ConnectionTrait>(conn: &C, client: &Client) -> AppResult<()> {
    let active_model = ActiveModel {
        id: Set(client.id),
        client_number: Set(client.client_number),
        first_name: Set(client.first_name.clone()),
        middle_name: Set(client.middle_name.clone()),
        last_name: Set(client.last_name.clone()),
        address: Set(client.address.clone()),
        phone_number: Set(client.phone_number.clone()),
        email: Set(client.email.clone()),
        created_at: Set(client.created_at),
        updated_at: Set(client.updated_at),
    };

    ClientEntity::insert(active_model)
        .exec_without_returning(conn)
        .await
        .map_err(unique_violation)?;
    Ok(())
}

/// Persist contact fields. Number, email and creation time are left as stored.
pub(crate) async fn update<C: ConnectionTrait>(conn: &C, client: &Client) -> AppResult<()> {
    let active_model = ActiveModel {
        id: Unchanged(client.id),
        client_number: Unchanged(client.client_number),
        first_name: Set(client.first_name.clone()),
        middle_name: Set(client.middle_name.clone()),
        last_name: Set(client.last_name.clone()),
        address: Set(client.address.clone()),
        phone_number: Set(client.phone_number.clone()),
        email: Unchanged(client.email.clone()),
        created_at: Unchanged(client.created_at),
        updated_at: Set(client.updated_at),
    };

    active_model.update(conn).await.map_err(unique_violation)?;
    Ok(())
}

pub(crate) async fn delete<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<()> {
    let result = ClientEntity::delete_by_id(id).exec(conn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::ClientNotFound);
    }

    Ok(())
}

/// Map a unique-index hit on email or phone to its duplicate error.
///
/// The existence checks run before writing, so a concurrent registration
/// can still reach the index first.
fn unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains("email") => {
            AppError::DuplicateEmail
        }
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains("phone_number") => {
            AppError::DuplicatePhone
        }
        _ => AppError::Database(err),
    }
}

/// Clients left-joined to their categories, filtered but not ordered
fn joined_query(filter: &ClientFilter) -> Select<ClientEntity> {
    let mut query = ClientEntity::find()
        .select_only()
        .columns([
            client::Column::Id,
            client::Column::ClientNumber,
            client::Column::FirstName,
            client::Column::MiddleName,
            client::Column::LastName,
            client::Column::Address,
            client::Column::PhoneNumber,
            client::Column::Email,
            client::Column::CreatedAt,
        ])
        .column_as(
            client_product_category::Column::ProductCategoryId,
            "product_category_id",
        )
        .column_as(product_category::Column::DisplayName, "product_category_name")
        .join(
            JoinType::LeftJoin,
            client::Relation::ClientProductCategories.def(),
        )
        .join(
            JoinType::LeftJoin,
            client_product_category::Relation::ProductCategory.def(),
        );

    if let Some(keyword) = filter.search_keyword.as_deref() {
        query = query.filter(keyword_condition(keyword));
    }
    if let Some(category_id) = filter.product_category_id {
        query = query.filter(client_product_category::Column::ProductCategoryId.eq(category_id));
    }

    query
}

fn rows_query(filter: &ClientFilter, sort: ClientSort) -> Select<ClientEntity> {
    let order = match sort.order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    joined_query(filter)
        .order_by(sort_expr(sort.field), order)
        .order_by_asc(client::Column::Id)
        .order_by_asc(client_product_category::Column::Id)
}

/// Case-insensitive substring match on number, names, address and email.
///
/// Both the column and the keyword go through SQL `LOWER`, so they are
/// folded by the same rules. SQLite folds ASCII letters only.
fn keyword_condition(keyword: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(keyword));

    let number_as_text = Expr::expr(Func::cast_as(
        Expr::col((client::Entity, client::Column::ClientNumber)),
        Alias::new("TEXT"),
    ))
    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE));

    [
        client::Column::FirstName,
        client::Column::MiddleName,
        client::Column::LastName,
        client::Column::Address,
        client::Column::Email,
    ]
    .into_iter()
    .fold(Condition::any().add(number_as_text), |condition, column| {
        condition.add(lower_like(column, &pattern))
    })
}

/// `LOWER(column) LIKE LOWER(pattern) ESCAPE '!'`
fn lower_like(column: client::Column, pattern: &str) -> SimpleExpr {
    let lowered_pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
    );

    SimpleExpr::Binary(
        Box::new(Func::lower(Expr::col((client::Entity, column))).into()),
        BinOper::Like,
        Box::new(lowered_pattern),
    )
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn sort_expr(field: ClientSortField) -> SimpleExpr {
    let column = match field {
        ClientSortField::CreationTime => client::Column::CreatedAt,
        ClientSortField::ClientNumber => client::Column::ClientNumber,
        ClientSortField::FirstName => client::Column::FirstName,
        ClientSortField::MiddleName => client::Column::MiddleName,
        ClientSortField::LastName => client::Column::LastName,
        ClientSortField::Address => client::Column::Address,
        ClientSortField::Email => client::Column::Email,
        ClientSortField::PhoneNumber => client::Column::PhoneNumber,
        ClientSortField::ProductCategoryName => {
            return Expr::col((product_category::Entity, product_category::Column::DisplayName))
                .into();
        }
    };

    Expr::col((client::Entity, column)).into()
}

#[derive(Debug, FromQueryResult)]
struct ClientRowModel {
    id: Uuid,
    client_number: i32,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    address: String,
    phone_number: String,
    email: String,
    product_category_id: Option<Uuid>,
    product_category_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ClientRowModel> for ClientRow {
    fn from(row: ClientRowModel) -> Self {
        ClientRow {
            id: row.id,
            client_number: row.client_number,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            address: row.address,
            phone_number: row.phone_number,
            email: row.email,
            product_category_id: row.product_category_id,
            product_category_name: row.product_category_name,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateClient;
    use sea_orm::QueryTrait;
    use sea_orm_migration::MigratorTrait;

    #[test]
    fn escape_like_guards_wildcards() {
        assert_eq!(escape_like("york"), "york");
        assert_eq!(escape_like("50%_off!"), "50!%!_off!!");
    }

    async fn migrated_db() -> DatabaseConnection {
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = sea_orm::Database::connect(options).await.unwrap();
        crate::infra::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn client(number: i32, phone: &str, email: &str) -> Client {
        Client::register(
            number,
            CreateClient {
                first_name: "Ada".to_string(),
                middle_name: None,
                last_name: "Lovelace".to_string(),
                address: "1 Analytical Row".to_string(),
                phone_number: phone.to_string(),
                email: email.to_string(),
                product_category_ids: vec![],
            },
        )
    }

    #[tokio::test]
    async fn unique_index_hits_map_to_duplicate_errors() {
        let db = migrated_db().await;
        insert(&db, &client(100, "+44 1", "ada@example.com")).await.unwrap();

        let err = insert(&db, &client(101, "+44 2", "ada@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        let err = insert(&db, &client(102, "+44 1", "other@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicatePhone));

        let mut second = client(103, "+44 3", "second@example.com");
        insert(&db, &second).await.unwrap();
        second.phone_number = "+44 1".to_string();
        let err = update(&db, &second).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicatePhone));
    }

    #[tokio::test]
    async fn other_constraint_hits_stay_database_errors() {
        let db = migrated_db().await;
        insert(&db, &client(100, "+44 1", "ada@example.com")).await.unwrap();

        let err = insert(&db, &client(100, "+44 2", "bob@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn keyword_is_lowered_in_sql() {
        let filter = ClientFilter::new(Some("École"), None);
        let sql = joined_query(&filter)
            .build(sea_orm::DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#"LOWER("clients"."address") LIKE LOWER("#));
        assert!(sql.contains("ESCAPE '!'"));
        assert!(sql.contains("%École%"));
    }
}
