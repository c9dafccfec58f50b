//! Shared fixtures for integration tests: a migrated in-memory SQLite
//! database and a few seeded product categories.

#![allow(dead_code)]

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use client_registry::domain::{CreateClient, ProductCategory, UpdateClient};
use client_registry::infra::{CategoryRepository, CategoryStore, Migrator};

/// Fresh migrated database. A single pooled connection keeps the
/// in-memory database alive for the whole test.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite connects");
    Migrator::up(&db, None).await.expect("migrations apply");
    db
}

/// Insert categories, returned in the order given
pub async fn seed_categories(db: &DatabaseConnection, names: &[&str]) -> Vec<ProductCategory> {
    let store = CategoryStore::new(db.clone());
    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        categories.push(store.create(name.to_string()).await.expect("category inserts"));
    }
    categories
}

/// Join rows stored for a client, read straight from the table
pub async fn association_count(db: &DatabaseConnection, client_id: Uuid) -> i64 {
    let statement = Statement::from_sql_and_values(
        db.get_database_backend(),
        "SELECT COUNT(*) AS n FROM client_product_categories WHERE client_id = ?",
        [client_id.into()],
    );
    let row = db
        .query_one(statement)
        .await
        .expect("count query runs")
        .expect("count returns a row");
    row.try_get("", "n").expect("count is an integer")
}

pub fn registration(n: u32, category_ids: Vec<Uuid>) -> CreateClient {
    CreateClient {
        first_name: format!("First{}", n),
        middle_name: None,
        last_name: format!("Last{}", n),
        address: format!("{} Main Street", n),
        phone_number: format!("+44 1904 {:06}", n),
        email: format!("client{}@example.com", n),
        product_category_ids: category_ids,
    }
}

pub fn update_from(input: &CreateClient, category_ids: Vec<Uuid>) -> UpdateClient {
    UpdateClient {
        first_name: input.first_name.clone(),
        middle_name: input.middle_name.clone(),
        last_name: input.last_name.clone(),
        address: input.address.clone(),
        phone_number: input.phone_number.clone(),
        product_category_ids: category_ids,
    }
}
