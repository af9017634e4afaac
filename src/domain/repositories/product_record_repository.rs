// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product_record::ProductRecord;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 语句构建错误
    #[error("Query build error: {0}")]
    Query(String),
}

/// 商品记录仓库特质
///
/// 关系型数据库写入端。每条记录单独插入，失败不影响后续记录。
#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    /// 确保数据表存在，重复调用不会报错
    async fn ensure_table(&self) -> Result<(), RepositoryError>;
    /// 清空数据表，返回删除的行数
    async fn clear(&self) -> Result<u64, RepositoryError>;
    /// 插入一条记录
    async fn insert(&self, record: &ProductRecord) -> Result<(), RepositoryError>;
    /// 数据表名
    fn table_name(&self) -> &str;
}
