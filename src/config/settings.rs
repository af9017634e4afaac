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

use crate::engines::session::{SessionContext, DEFAULT_COOKIE_URL, DEFAULT_USER_AGENT};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 默认数据表名
pub const DEFAULT_TABLE: &str = "globe_daily_data";

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
}

/// 数据库配置设置
///
/// host、user、password 任一缺失时关闭数据库写入，只输出CSV文件。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库主机
    pub host: Option<String>,
    /// 数据库名称
    pub dbname: String,
    /// 用户名
    pub user: Option<String>,
    /// 密码
    pub password: Option<String>,
    /// 端口
    pub port: u16,
    /// 数据表名
    pub table: String,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 运行开始前是否清空数据表
    pub clear_table: bool,
}

/// 数据库连接凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseCredentials {
    pub host: String,
    pub user: String,
    pub password: String,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 输入CSV文件路径
    pub input_path: String,
    /// 输出目录
    pub output_dir: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 两次请求之间的固定间隔（毫秒）
    pub delay_ms: u64,
    /// User-Agent
    pub user_agent: String,
    /// 会话Cookie所属站点
    pub cookie_url: String,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl DatabaseSettings {
    /// 返回完整的连接凭据；空白值视为缺失
    pub fn credentials(&self) -> Option<DatabaseCredentials> {
        Some(DatabaseCredentials {
            host: trimmed(&self.host)?,
            user: trimmed(&self.user)?,
            password: trimmed(&self.password)?,
        })
    }

    /// 构造PostgreSQL连接URL，凭据缺失时返回 `None`
    pub fn connection_url(&self) -> Option<String> {
        let credentials = self.credentials()?;
        Some(format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&credentials.user),
            urlencoding::encode(&credentials.password),
            credentials.host,
            self.port,
            self.dbname.trim()
        ))
    }

    pub fn table_name(&self) -> &str {
        let table = self.table.trim();
        if table.is_empty() {
            DEFAULT_TABLE
        } else {
            table
        }
    }
}

impl ScraperSettings {
    /// 根据配置生成会话上下文
    pub fn session(&self) -> SessionContext {
        SessionContext {
            user_agent: self.user_agent.clone(),
            cookie_url: self.cookie_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..SessionContext::default()
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        // Default database settings
        .set_default("database.dbname", "postgres")?
        .set_default("database.port", 5432)?
        .set_default("database.table", DEFAULT_TABLE)?
        .set_default("database.connect_timeout", 10)?
        .set_default("database.clear_table", false)?
        // Default scraper settings
        .set_default("scraper.input_path", "attached_assets/product_links.csv")?
        .set_default("scraper.output_dir", "scraped_data")?
        .set_default("scraper.timeout_secs", 30)?
        .set_default("scraper.delay_ms", 1000)?
        .set_default("scraper.user_agent", DEFAULT_USER_AGENT)?
        .set_default("scraper.cookie_url", DEFAULT_COOKIE_URL)
}

/// 读取 `SUPABASE_*` 环境变量，空白值忽略
fn supabase_var(name: &str) -> Option<String> {
    std::env::var(format!("SUPABASE_{}", name))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 加载顺序（后者覆盖前者）：默认值、`config/default.toml`、
    /// `config/{APP_ENVIRONMENT}.toml`、`SCRAPER__*` 环境变量、`SUPABASE_*` 环境变量。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCRAPER").separator("__"));

        for (var, key) in [
            ("HOST", "database.host"),
            ("DBNAME", "database.dbname"),
            ("USER", "database.user"),
            ("PASSWORD", "database.password"),
            ("PORT", "database.port"),
            ("TABLE", "database.table"),
        ] {
            builder = builder.set_override_option(key, supabase_var(var))?;
        }

        builder.build()?.try_deserialize()
    }

    /// 仅使用默认值构建配置（不读取文件和环境变量）
    pub fn defaults() -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
