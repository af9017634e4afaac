// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::TestDatabase;
use product_scraper::domain::models::product_record::ProductRecord;
use product_scraper::domain::repositories::product_record_repository::ProductRecordRepository;

const TABLE: &str = "globe_daily_data";

fn widget() -> ProductRecord {
    ProductRecord {
        product_name: Some("Widget A".to_string()),
        product_code: Some("WID-001".to_string()),
        sku: Some("WID-001".to_string()),
        price: Some("$12.50".to_string()),
        ..ProductRecord::empty("https://shop.example.com/widget-a.html")
    }
}

/// 建表可重复执行，空表清空时返回0
#[tokio::test]
async fn test_ensure_table_is_idempotent_and_clear_on_empty_table() {
    let test_db = TestDatabase::new().await;
    let repo = test_db.repository(TABLE);

    repo.ensure_table().await.unwrap();
    repo.ensure_table().await.unwrap();

    assert_eq!(repo.clear().await.unwrap(), 0);
    assert_eq!(repo.table_name(), TABLE);
}

#[tokio::test]
async fn test_insert_stores_missing_fields_as_null() {
    let test_db = TestDatabase::new().await;
    let repo = test_db.repository(TABLE);
    repo.ensure_table().await.unwrap();

    repo.insert(&widget()).await.unwrap();
    repo.insert(&ProductRecord::empty("https://shop.example.com/empty.html"))
        .await
        .unwrap();

    assert_eq!(test_db.count(TABLE).await, 2);
    assert_eq!(
        test_db.column(TABLE, "product_name").await,
        vec![Some("Widget A".to_string()), None]
    );
    assert_eq!(
        test_db.column(TABLE, "sku").await,
        vec![Some("WID-001".to_string()), None]
    );
    assert_eq!(
        test_db.column(TABLE, "status").await,
        vec![Some("success".to_string()), Some("success".to_string())]
    );
    assert!(test_db
        .column(TABLE, "scraped_at")
        .await
        .iter()
        .all(Option::is_some));
}

#[tokio::test]
async fn test_clear_reports_deleted_rows() {
    let test_db = TestDatabase::new().await;
    let repo = test_db.repository(TABLE);
    repo.ensure_table().await.unwrap();

    for _ in 0..3 {
        repo.insert(&widget()).await.unwrap();
    }

    assert_eq!(repo.clear().await.unwrap(), 3);
    assert_eq!(test_db.count(TABLE).await, 0);
}

#[tokio::test]
async fn test_table_name_is_quoted() {
    let test_db = TestDatabase::new().await;
    let table = "daily data-2025";
    let repo = test_db.repository(table);

    repo.ensure_table().await.unwrap();
    repo.insert(&widget()).await.unwrap();

    assert_eq!(test_db.count(table).await, 1);
}

#[tokio::test]
async fn test_insert_without_table_fails() {
    let test_db = TestDatabase::new().await;
    let repo = test_db.repository("missing_table");

    assert!(repo.insert(&widget()).await.is_err());
}
