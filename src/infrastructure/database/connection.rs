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

use crate::config::settings::DatabaseSettings;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::warn;

/// 创建数据库连接池
///
/// 运行期间只持有一个连接池，连接断开后由连接池重新建立。
///
/// # 参数
///
/// * `settings` - 数据库配置
///
/// # 返回值
///
/// * `Ok(Some(DatabaseConnection))` - 数据库连接
/// * `Ok(None)` - 缺少凭据，数据库写入被关闭
/// * `Err(DbErr)` - 连接过程中出现的错误
pub async fn create_pool(settings: &DatabaseSettings) -> Result<Option<DatabaseConnection>, DbErr> {
    let Some(url) = settings.connection_url() else {
        warn!("PostgreSQL credentials not found, database upload disabled");
        return Ok(None);
    };

    connect(url, settings.connect_timeout).await.map(Some)
}

/// 按URL建立连接，测试中用于连接SQLite
pub async fn connect(url: String, timeout_secs: Option<u64>) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(url);

    opt.max_connections(1).min_connections(1);

    if let Some(timeout) = timeout_secs {
        opt.connect_timeout(Duration::from_secs(timeout));
        opt.acquire_timeout(Duration::from_secs(timeout));
    }

    opt.max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(opt).await
}
