//! Client service tests against a migrated in-memory SQLite database.

mod common;

use std::io::Cursor;
use std::sync::Arc;

use calamine::{Data, Reader, Xlsx};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use client_registry::domain::{ClientFilter, ClientSort};
use client_registry::errors::AppError;
use client_registry::infra::Persistence;
use client_registry::services::{ClientManager, ClientService};
use client_registry::types::PageRequest;

use sea_orm::ConnectionTrait;

use common::{association_count, registration, seed_categories, setup_db, update_from};

fn service(db: sea_orm::DatabaseConnection) -> ClientManager<Persistence> {
    ClientManager::new(Arc::new(Persistence::new(db)))
}

async fn all_rows(service: &impl ClientService) -> Vec<client_registry::domain::ClientRow> {
    service
        .list_clients(
            ClientFilter::default(),
            ClientSort::default(),
            PageRequest::new(0, 100),
        )
        .await
        .unwrap()
        .items
}

#[tokio::test]
async fn create_rejects_unknown_category() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings"]).await;
    let service = service(db);

    let input = registration(1, vec![categories[0].product_category_id, Uuid::new_v4()]);
    let err = assert_err!(service.create_client(input).await);

    assert!(matches!(err, AppError::CategoryNotFound));
    assert!(all_rows(&service).await.is_empty());
}

#[tokio::test]
async fn create_rejects_duplicate_email() {
    let db = setup_db().await;
    let service = service(db);

    assert_ok!(service.create_client(registration(1, vec![])).await);

    let mut second = registration(2, vec![]);
    second.email = "client1@example.com".to_string();
    let err = assert_err!(service.create_client(second).await);

    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn create_rejects_duplicate_phone() {
    let db = setup_db().await;
    let service = service(db);

    assert_ok!(service.create_client(registration(1, vec![])).await);

    let mut second = registration(2, vec![]);
    second.phone_number = registration(1, vec![]).phone_number;
    let err = assert_err!(service.create_client(second).await);

    assert!(matches!(err, AppError::DuplicatePhone));
}

#[tokio::test]
async fn unknown_category_is_reported_before_duplicates() {
    let db = setup_db().await;
    let service = service(db);

    assert_ok!(service.create_client(registration(1, vec![])).await);

    let err = assert_err!(
        service
            .create_client(registration(1, vec![Uuid::new_v4()]))
            .await
    );
    assert!(matches!(err, AppError::CategoryNotFound));
}

#[tokio::test]
async fn client_numbers_start_at_100_and_increase() {
    let db = setup_db().await;
    let service = service(db);

    let first = assert_ok!(service.create_client(registration(1, vec![])).await);
    let second = assert_ok!(service.create_client(registration(2, vec![])).await);
    let third = assert_ok!(service.create_client(registration(3, vec![])).await);

    assert_eq!(first.client_number, 100);
    assert_eq!(second.client_number, 101);
    assert_eq!(third.client_number, 102);

    // Numbers continue from the maximum, not the count
    assert_ok!(service.delete_client(second.id).await);
    let fourth = assert_ok!(service.create_client(registration(4, vec![])).await);
    assert_eq!(fourth.client_number, 103);
}

#[tokio::test]
async fn get_client_returns_every_category() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans", "Insurance"]).await;
    let service = service(db);

    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let client = assert_ok!(service.create_client(registration(1, ids)).await);

    let detail = assert_ok!(service.get_client(client.id).await);
    let names: Vec<&str> = detail
        .product_categories
        .iter()
        .map(|c| c.product_category_name.as_str())
        .collect();

    assert_eq!(detail.client_number, 100);
    assert_eq!(names, vec!["Insurance", "Loans", "Savings"]);
}

#[tokio::test]
async fn duplicate_selected_categories_are_collapsed() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings"]).await;
    let service = service(db);

    let id = categories[0].product_category_id;
    let client = assert_ok!(service.create_client(registration(1, vec![id, id])).await);

    let detail = assert_ok!(service.get_client(client.id).await);
    assert_eq!(detail.product_categories.len(), 1);
}

#[tokio::test]
async fn update_replaces_category_selection() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Alpha", "Bravo", "Charlie"]).await;
    let (a, b, c) = (
        categories[0].product_category_id,
        categories[1].product_category_id,
        categories[2].product_category_id,
    );
    let service = service(db);

    let input = registration(1, vec![a, c]);
    let client = assert_ok!(service.create_client(input.clone()).await);

    let mut changes = update_from(&input, vec![a, b]);
    changes.address = "1 New Road".to_string();
    assert_ok!(service.update_client(client.id, changes).await);

    let detail = assert_ok!(service.get_client(client.id).await);
    let selected: Vec<Uuid> = detail
        .product_categories
        .iter()
        .map(|c| c.product_category_id)
        .collect();
    assert_eq!(selected, vec![a, b]);
    assert_eq!(detail.address, "1 New Road");
    assert_eq!(detail.email, input.email);

    let rows = all_rows(&service).await;
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn update_rejects_phone_of_another_client() {
    let db = setup_db().await;
    let service = service(db);

    let first_input = registration(1, vec![]);
    let second_input = registration(2, vec![]);
    assert_ok!(service.create_client(first_input.clone()).await);
    let second = assert_ok!(service.create_client(second_input.clone()).await);

    // Keeping its own number is fine
    assert_ok!(
        service
            .update_client(second.id, update_from(&second_input, vec![]))
            .await
    );

    let mut changes = update_from(&second_input, vec![]);
    changes.phone_number = first_input.phone_number.clone();
    let err = assert_err!(service.update_client(second.id, changes).await);
    assert!(matches!(err, AppError::DuplicatePhone));
}

#[tokio::test]
async fn update_rejects_unknown_client_and_category() {
    let db = setup_db().await;
    let service = service(db);

    let input = registration(1, vec![]);
    let err = assert_err!(
        service
            .update_client(Uuid::new_v4(), update_from(&input, vec![]))
            .await
    );
    assert!(matches!(err, AppError::ClientNotFound));

    let client = assert_ok!(service.create_client(input.clone()).await);
    let err = assert_err!(
        service
            .update_client(client.id, update_from(&input, vec![Uuid::new_v4()]))
            .await
    );
    assert!(matches!(err, AppError::CategoryNotFound));
}

#[tokio::test]
async fn delete_removes_client_and_associations() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let service = service(db.clone());

    let client = assert_ok!(service.create_client(registration(1, ids)).await);
    let other = assert_ok!(service.create_client(registration(2, vec![])).await);
    assert_eq!(association_count(&db, client.id).await, 2);

    assert_ok!(service.delete_client(client.id).await);
    assert_eq!(association_count(&db, client.id).await, 0);

    let err = assert_err!(service.get_client(client.id).await);
    assert!(matches!(err, AppError::ClientNotFound));

    let rows = all_rows(&service).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, other.id);

    let err = assert_err!(service.delete_client(client.id).await);
    assert!(matches!(err, AppError::ClientNotFound));
}

#[tokio::test]
async fn delete_removes_associations_without_relying_on_cascade() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let service = service(db.clone());

    let client = assert_ok!(service.create_client(registration(1, ids)).await);
    assert_ok!(db.execute_unprepared("PRAGMA foreign_keys = OFF").await);

    assert_ok!(service.delete_client(client.id).await);

    assert_eq!(association_count(&db, client.id).await, 0);
}

#[tokio::test]
async fn listing_yields_one_row_per_association() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let service = service(db);

    let with_two = assert_ok!(service.create_client(registration(1, ids)).await);
    let with_none = assert_ok!(service.create_client(registration(2, vec![])).await);

    let rows = all_rows(&service).await;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().filter(|r| r.id == with_two.id).count(), 2);

    let bare: Vec<_> = rows.iter().filter(|r| r.id == with_none.id).collect();
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].product_category_id, None);
    assert_eq!(bare[0].product_category_name, None);
}

#[tokio::test]
async fn search_by_address_returns_only_matching_client() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let service = service(db);

    let mut target = registration(1, ids);
    target.address = "42 Juniper Crescent".to_string();
    let target = assert_ok!(service.create_client(target).await);
    assert_ok!(service.create_client(registration(2, vec![])).await);
    assert_ok!(service.create_client(registration(3, vec![])).await);

    let page = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(Some("JUNIPER cres"), None),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );

    assert_eq!(page.total_count, 2);
    assert!(page.items.iter().all(|row| row.id == target.id));
}

#[tokio::test]
async fn search_matches_client_number_and_email() {
    let db = setup_db().await;
    let service = service(db);

    assert_ok!(service.create_client(registration(1, vec![])).await);
    let second = assert_ok!(service.create_client(registration(2, vec![])).await);

    let by_number = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(Some("101"), None),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );
    assert_eq!(by_number.total_count, 1);
    assert_eq!(by_number.items[0].id, second.id);

    let by_email = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(Some("CLIENT2@"), None),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );
    assert_eq!(by_email.total_count, 1);
    assert_eq!(by_email.items[0].id, second.id);

    let wildcard = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(Some("%"), None),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );
    assert_eq!(wildcard.total_count, 0);
}

#[tokio::test]
async fn search_folds_keyword_and_column_alike() {
    let db = setup_db().await;
    let service = service(db);

    let mut target = registration(1, vec![]);
    target.address = "ÉCOLE Road".to_string();
    let target = assert_ok!(service.create_client(target).await);
    assert_ok!(service.create_client(registration(2, vec![])).await);

    let page = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(Some("ÉCOLE road"), None),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, target.id);
}

#[tokio::test]
async fn category_filter_keeps_matching_rows() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let (savings, loans) = (
        categories[0].product_category_id,
        categories[1].product_category_id,
    );
    let service = service(db);

    let both = assert_ok!(service.create_client(registration(1, vec![savings, loans])).await);
    assert_ok!(service.create_client(registration(2, vec![savings])).await);
    assert_ok!(service.create_client(registration(3, vec![])).await);

    let page = assert_ok!(
        service
            .list_clients(
                ClientFilter::new(None, Some(loans)),
                ClientSort::default(),
                PageRequest::default(),
            )
            .await
    );

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, both.id);
    assert_eq!(page.items[0].product_category_name.as_deref(), Some("Loans"));
}

#[tokio::test]
async fn total_count_is_stable_under_paging() {
    let db = setup_db().await;
    let service = service(db);

    for n in 1..=5 {
        assert_ok!(service.create_client(registration(n, vec![])).await);
    }

    let sort = ClientSort::parse(Some("clientId desc"), None).unwrap();
    let mut seen = Vec::new();
    for skip in [0, 2, 4] {
        let page = assert_ok!(
            service
                .list_clients(ClientFilter::default(), sort, PageRequest::new(skip, 2))
                .await
        );
        assert_eq!(page.total_count, 5);
        seen.extend(page.items.into_iter().map(|row| row.client_number));
    }

    assert_eq!(seen, vec![104, 103, 102, 101, 100]);
}

#[tokio::test]
async fn sorts_by_last_name_descending() {
    let db = setup_db().await;
    let service = service(db);

    for (n, last) in [(1, "Brown"), (2, "Adams"), (3, "Clark")] {
        let mut input = registration(n, vec![]);
        input.last_name = last.to_string();
        assert_ok!(service.create_client(input).await);
    }

    let sort = ClientSort::parse(Some("last_name"), Some("desc")).unwrap();
    let page = assert_ok!(
        service
            .list_clients(ClientFilter::default(), sort, PageRequest::default())
            .await
    );
    let names: Vec<&str> = page.items.iter().map(|r| r.last_name.as_str()).collect();

    assert_eq!(names, vec!["Clark", "Brown", "Adams"]);
}

#[tokio::test]
async fn export_writes_header_and_one_row_per_association() {
    let db = setup_db().await;
    let categories = seed_categories(&db, &["Savings", "Loans"]).await;
    let ids: Vec<Uuid> = categories.iter().map(|c| c.product_category_id).collect();
    let service = service(db);

    let mut first = registration(1, ids);
    first.middle_name = Some("Q".to_string());
    assert_ok!(service.create_client(first).await);
    assert_ok!(service.create_client(registration(2, vec![])).await);

    let export = assert_ok!(service.export_clients().await);
    assert!(export.file_name.starts_with("ClientDetails-"));
    assert!(export.file_name.ends_with(".xlsx"));

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(export.content)).unwrap();
    let range = workbook.worksheet_range("Client Details").unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();

    assert_eq!(rows.len(), 4);
    let header: Vec<String> = rows[0].iter().map(|cell| cell.to_string()).collect();
    assert_eq!(
        header,
        vec![
            "Client Id",
            "Full Name",
            "Address",
            "Email",
            "Phone Number",
            "Product",
            "Product Category",
        ]
    );

    assert_eq!(rows[1][0], Data::Float(100.0));
    assert_eq!(rows[1][1], Data::String("First1 Q Last1".to_string()));

    let products: Vec<String> = rows[1..3].iter().map(|row| row[5].to_string()).collect();
    assert!(products.contains(&"Savings".to_string()));
    assert!(products.contains(&"Loans".to_string()));

    assert_eq!(rows[3][0], Data::Float(101.0));
    assert_eq!(rows[3][5], Data::Empty);
}

#[tokio::test]
async fn categories_are_listed_by_name() {
    let db = setup_db().await;
    seed_categories(&db, &["Savings", "Insurance", "Loans"]).await;
    let service = service(db);

    let categories = assert_ok!(service.list_categories().await);
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c.product_category_name.as_str())
        .collect();

    assert_eq!(names, vec!["Insurance", "Loans", "Savings"]);
}
