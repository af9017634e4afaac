// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{write_links, TestDatabase};
use product_scraper::application::use_cases::scrape_run::{RunConfig, ScrapeRunUseCase};
use product_scraper::domain::models::product_record::{ProductRecord, ScrapeStatus};
use product_scraper::domain::repositories::product_record_repository::ProductRecordRepository;
use product_scraper::engines::session::SessionContext;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WIDGET_PAGE: &str = r#"
    <html>
        <body>
            <h1 class="page-title">Widget A</h1>
            <div class="stock available">In stock</div>
            <div class="product-info-stock-sku">SKU: WID-001</div>
            <span class="price">$12.50</span>
            <input id="qty" name="qty" value="1">
            <div class="product-description">Heavy duty widget.</div>
        </body>
    </html>
"#;

const BARE_PAGE: &str = "<html><body><p>Nothing to see</p></body></html>";

async fn start_shop() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widget-a.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WIDGET_PAGE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bare.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BARE_PAGE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(WIDGET_PAGE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    server
}

fn run_config(server: &MockServer, dir: &TempDir, timeout: Duration) -> RunConfig {
    RunConfig {
        session: SessionContext::default()
            .with_cookie_url(format!("{}/", server.uri()))
            .with_timeout(timeout),
        delay: Duration::ZERO,
        output_dir: dir.path().join("scraped_data"),
        clear_table: true,
    }
}

/// 完整运行：成功页面、404页面、无匹配元素页面
#[tokio::test]
async fn test_run_end_to_end() {
    let server = start_shop().await;
    let dir = TempDir::new().unwrap();
    let test_db = TestDatabase::new().await;
    let repo = Arc::new(test_db.repository("globe_daily_data"));

    let links: Vec<String> = ["/widget-a.html", "/gone.html", "/bare.html"]
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();
    let input = write_links(dir.path(), &links);

    let use_case = ScrapeRunUseCase::from_config(
        run_config(&server, &dir, Duration::from_secs(5)),
        Some(repo.clone() as Arc<dyn ProductRecordRepository>),
    )
    .unwrap();

    let summary = use_case.run(&input).await.unwrap().unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.db_inserted, 2);
    assert_eq!(summary.db_failed, 0);

    let widget = &summary.records[0];
    assert_eq!(widget.url, links[0]);
    assert_eq!(widget.product_name.as_deref(), Some("Widget A"));
    assert_eq!(widget.sku.as_deref(), Some("WID-001"));
    assert_eq!(widget.product_code.as_deref(), Some("WID-001"));
    assert_eq!(widget.price.as_deref(), Some("$12.50"));
    assert_eq!(widget.availability.as_deref(), Some("In stock"));
    assert_eq!(widget.product_quantity.as_deref(), Some("1"));
    assert_eq!(widget.description.as_deref(), Some("Heavy duty widget."));

    let gone = &summary.records[1];
    assert!(gone.status.to_string().starts_with("error: "));
    assert_eq!(
        ProductRecord {
            status: ScrapeStatus::Success,
            ..gone.clone()
        },
        ProductRecord::empty(links[1].as_str())
    );

    assert_eq!(summary.records[2], ProductRecord::empty(links[2].as_str()));

    // CSV: header plus one row per URL, in input order
    let mut reader = csv::Reader::from_path(&summary.output_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], links[0]);
    assert_eq!(&rows[0][1], "Widget A");
    assert_eq!(&rows[0][8], "success");
    assert_eq!(&rows[1][0], links[1]);
    assert!(rows[1][8].starts_with("error: "));
    assert_eq!(&rows[2][0], links[2]);
    assert!((1..8).all(|i| rows[2][i].is_empty()));

    // Only successful records reach the database
    assert_eq!(test_db.count("globe_daily_data").await, 2);
    assert_eq!(
        test_db.column("globe_daily_data", "url").await,
        vec![Some(links[0].clone()), Some(links[2].clone())]
    );
}

#[tokio::test]
async fn test_run_records_timeout_and_continues() {
    let server = start_shop().await;
    let dir = TempDir::new().unwrap();

    let links = vec![
        format!("{}/slow.html", server.uri()),
        format!("{}/widget-a.html", server.uri()),
    ];
    let input = write_links(dir.path(), &links);

    let use_case = ScrapeRunUseCase::from_config(
        run_config(&server, &dir, Duration::from_millis(200)),
        None,
    )
    .unwrap();

    let summary = use_case.run(&input).await.unwrap().unwrap();

    assert_eq!(summary.total, 2);
    match &summary.records[0].status {
        ScrapeStatus::Failure(reason) => assert!(!reason.is_empty()),
        ScrapeStatus::Success => panic!("slow page should time out"),
    }
    assert!(summary.records[0].product_name.is_none());
    assert_eq!(summary.records[1].product_name.as_deref(), Some("Widget A"));
}

#[tokio::test]
async fn test_rerun_with_clear_table_replaces_rows() {
    let server = start_shop().await;
    let dir = TempDir::new().unwrap();
    let test_db = TestDatabase::new().await;
    let repo: Arc<dyn ProductRecordRepository> = Arc::new(test_db.repository("products"));

    let input = write_links(dir.path(), &[format!("{}/widget-a.html", server.uri())]);
    let use_case = ScrapeRunUseCase::from_config(
        run_config(&server, &dir, Duration::from_secs(5)),
        Some(repo),
    )
    .unwrap();

    use_case.run(&input).await.unwrap();
    use_case.run(&input).await.unwrap();

    assert_eq!(test_db.count("products").await, 1);
}
