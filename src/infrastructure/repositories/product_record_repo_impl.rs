// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::product_record::{ProductRecord, RECORD_COLUMNS};
use crate::domain::repositories::product_record_repository::{
    ProductRecordRepository, RepositoryError,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, ColumnDef, Expr, Query, SimpleExpr, Table};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use tracing::debug;

const SCRAPED_AT: &str = "scraped_at";
const CREATED_AT: &str = "created_at";

/// 商品记录仓库实现
///
/// 表名在运行时配置，所有语句通过 sea-query 构建，标识符由构建器负责转义。
pub struct ProductRecordRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
    /// 数据表名
    table: String,
}

impl ProductRecordRepositoryImpl {
    /// 创建新的商品记录仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    /// * `table` - 数据表名
    ///
    /// # 返回值
    ///
    /// 返回新的商品记录仓库实例
    pub fn new(db: Arc<DatabaseConnection>, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    fn table_ident(&self) -> Alias {
        Alias::new(self.table.as_str())
    }
}

#[async_trait]
impl ProductRecordRepository for ProductRecordRepositoryImpl {
    async fn ensure_table(&self) -> Result<(), RepositoryError> {
        let mut table = Table::create();
        table.table(self.table_ident()).if_not_exists().col(
            ColumnDef::new(Alias::new("id"))
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        );
        for column in RECORD_COLUMNS {
            table.col(ColumnDef::new(Alias::new(column)).text());
        }
        table
            .col(ColumnDef::new(Alias::new(SCRAPED_AT)).timestamp_with_time_zone())
            .col(
                ColumnDef::new(Alias::new(CREATED_AT))
                    .timestamp_with_time_zone()
                    .default(Expr::current_timestamp()),
            );

        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&table)).await?;

        debug!(table = %self.table, "Table ensured");
        Ok(())
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let delete = Query::delete().from_table(self.table_ident()).to_owned();

        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&delete)).await?;

        Ok(result.rows_affected())
    }

    async fn insert(&self, record: &ProductRecord) -> Result<(), RepositoryError> {
        let now = Utc::now();

        let mut columns: Vec<Alias> = RECORD_COLUMNS.iter().map(|c| Alias::new(*c)).collect();
        columns.push(Alias::new(SCRAPED_AT));
        columns.push(Alias::new(CREATED_AT));

        // Empty fields are stored as NULL
        let mut values: Vec<SimpleExpr> = record
            .field_values()
            .into_iter()
            .map(|v| v.map(str::to_string).into())
            .collect();
        values.push(record.status.to_string().into());
        values.push(now.into());
        values.push(now.into());

        let mut insert = Query::insert();
        insert.into_table(self.table_ident()).columns(columns);
        insert
            .values(values)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let backend = self.db.get_database_backend();
        let txn = self.db.begin().await?;
        txn.execute(backend.build(&insert)).await?;
        txn.commit().await?;

        Ok(())
    }

    fn table_name(&self) -> &str {
        &self.table
    }
}
