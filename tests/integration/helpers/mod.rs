// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use product_scraper::infrastructure::database::connection;
use product_scraper::infrastructure::repositories::product_record_repo_impl::ProductRecordRepositoryImpl;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// 测试用数据库：SQLite 文件位于临时目录中，随目录一起删除
pub struct TestDatabase {
    pub db: Arc<DatabaseConnection>,
    _dir: TempDir,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let db = connection::connect(url, Some(5)).await.unwrap();
        Self {
            db: Arc::new(db),
            _dir: dir,
        }
    }

    pub fn repository(&self, table: &str) -> ProductRecordRepositoryImpl {
        ProductRecordRepositoryImpl::new(self.db.clone(), table)
    }

    pub async fn count(&self, table: &str) -> i64 {
        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM \"{}\"", table),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get("", "n").unwrap()
    }

    /// 按插入顺序读取某一列
    pub async fn column(&self, table: &str, column: &str) -> Vec<Option<String>> {
        let backend = self.db.get_database_backend();
        let rows = self
            .db
            .query_all(Statement::from_string(
                backend,
                format!(
                    "SELECT CAST(\"{}\" AS TEXT) AS v FROM \"{}\" ORDER BY id",
                    column, table
                ),
            ))
            .await
            .unwrap();
        rows.iter()
            .map(|row| row.try_get::<Option<String>>("", "v").unwrap())
            .collect()
    }
}

/// 写入只有 `product_link` 列的输入文件
pub fn write_links(dir: &Path, links: &[String]) -> PathBuf {
    let path = dir.join("product_links.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["product_link"]).unwrap();
    for link in links {
        writer.write_record([link]).unwrap();
    }
    writer.flush().unwrap();
    path
}
