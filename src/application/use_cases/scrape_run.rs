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

use crate::{
    config::settings::Settings,
    domain::{
        models::product_record::ProductRecord,
        repositories::product_record_repository::ProductRecordRepository,
        services::{extraction_service::ProductExtractor, selector_rules::ExtractionError},
    },
    engines::{
        reqwest_engine::ReqwestEngine,
        session::SessionContext,
        traits::{FetchError, PageFetcher},
    },
    infrastructure::{
        input::product_links::{load_product_links, InputError},
        storage::csv_file::{CsvRecordWriter, OutputError},
    },
};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// 输入行中链接为空时的失败原因
pub const EMPTY_LINK_REASON: &str = "empty product_link";

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
    #[error("Fetcher setup failed: {0}")]
    Fetcher(#[from] FetchError),
    #[error("Extraction rules invalid: {0}")]
    Extraction(#[from] ExtractionError),
}

/// 运行配置
///
/// 会话、请求间隔、输出目录都显式传入，不依赖全局状态。
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub session: SessionContext,
    pub delay: Duration,
    pub output_dir: PathBuf,
    pub clear_table: bool,
}

impl RunConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            session: settings.scraper.session(),
            delay: settings.scraper.delay(),
            output_dir: PathBuf::from(&settings.scraper.output_dir),
            clear_table: settings.database.clear_table,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            session: SessionContext::default(),
            delay: Duration::from_secs(1),
            output_dir: PathBuf::from("scraped_data"),
            clear_table: false,
        }
    }
}

/// 运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    TableEnsured,
    Cleared,
    Running,
    Completed,
}

/// 运行摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub db_inserted: usize,
    pub db_failed: usize,
    pub output_path: PathBuf,
    /// 按输入顺序排列的全部记录
    pub records: Vec<ProductRecord>,
}

pub struct ScrapeRunUseCase {
    fetcher: Arc<dyn PageFetcher>,
    extractor: ProductExtractor,
    repository: Option<Arc<dyn ProductRecordRepository>>,
    writer: CsvRecordWriter,
    config: RunConfig,
}

impl ScrapeRunUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: ProductExtractor,
        repository: Option<Arc<dyn ProductRecordRepository>>,
        config: RunConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            repository,
            writer: CsvRecordWriter::new(config.output_dir.clone()),
            config,
        }
    }

    /// 使用HTTP会话与默认提取规则创建用例
    ///
    /// # 参数
    ///
    /// * `config` - 运行配置
    /// * `repository` - 可选的关系型数据库写入端
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeRunUseCase)` - 用例实例
    /// * `Err(RunError)` - HTTP客户端或提取规则初始化失败
    pub fn from_config(
        config: RunConfig,
        repository: Option<Arc<dyn ProductRecordRepository>>,
    ) -> Result<Self, RunError> {
        let fetcher = Arc::new(ReqwestEngine::new(&config.session)?);
        let extractor = ProductExtractor::new()?;
        Ok(Self::new(fetcher, extractor, repository, config))
    }

    /// 执行一次完整的抓取运行
    ///
    /// 按输入顺序逐个抓取，单条失败只影响该条记录。成功记录逐条写入数据库，
    /// CSV文件在全部完成后一次性写出。
    ///
    /// # 参数
    ///
    /// * `input_path` - 商品链接CSV文件
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(RunSummary))` - 运行摘要
    /// * `Ok(None)` - 输入中没有任何链接
    /// * `Err(RunError)` - 输入无法读取或输出文件写入失败
    pub async fn run(&self, input_path: &Path) -> Result<Option<RunSummary>, RunError> {
        let mut state = RunState::NotStarted;
        debug!(?state, "Run starting");

        info!("Reading product links from: {}", input_path.display());
        let links = load_product_links(input_path).await?;
        let total = links.len();

        if links.is_empty() {
            warn!("No products were scraped!");
            return Ok(None);
        }
        info!("Found {} products to scrape", total);

        let repository = self.prepare_repository(&mut state).await;

        transition(&mut state, RunState::Running);

        let mut records = Vec::with_capacity(total);
        let mut db_inserted = 0;
        let mut db_failed = 0;

        for (index, url) in links.iter().enumerate() {
            info!("[{}/{}] Scraping: {}", index + 1, total, url);

            let record = self.scrape_one(url).await;

            if record.is_success() {
                if let Some(repo) = &repository {
                    match repo.insert(&record).await {
                        Ok(()) => db_inserted += 1,
                        Err(e) => {
                            db_failed += 1;
                            error!("Failed to insert {} into {}: {}", url, repo.table_name(), e);
                        }
                    }
                }
            }

            records.push(record);

            tokio::time::sleep(self.config.delay).await;
        }

        let output_path = self.writer.output_path(Local::now());
        self.writer.write_all(&output_path, &records).await?;
        info!("Data saved to: {}", output_path.display());

        transition(&mut state, RunState::Completed);

        let succeeded = records.iter().filter(|r| r.is_success()).count();
        let summary = RunSummary {
            total,
            succeeded,
            failed: total - succeeded,
            db_inserted,
            db_failed,
            output_path,
            records,
        };

        info!(
            "Scraping completed: total={}, successful={}, errors={}",
            summary.total, summary.succeeded, summary.failed
        );
        if repository.is_some() {
            info!(
                "Database upload: inserted={}, failed={}",
                summary.db_inserted, summary.db_failed
            );
        }

        Ok(Some(summary))
    }

    /// 准备数据库写入端；建表失败时本次运行不再写数据库
    async fn prepare_repository(
        &self,
        state: &mut RunState,
    ) -> Option<Arc<dyn ProductRecordRepository>> {
        let repo = self.repository.clone()?;

        if let Err(e) = repo.ensure_table().await {
            warn!(
                "Could not ensure table {}: {}; continuing without database",
                repo.table_name(),
                e
            );
            return None;
        }
        transition(state, RunState::TableEnsured);

        if self.config.clear_table {
            match repo.clear().await {
                Ok(deleted) => {
                    info!("Cleared {} rows from {}", deleted, repo.table_name());
                    transition(state, RunState::Cleared);
                }
                Err(e) => warn!("Failed to clear {}: {}", repo.table_name(), e),
            }
        }

        Some(repo)
    }

    async fn scrape_one(&self, url: &str) -> ProductRecord {
        if url.is_empty() {
            error!("Empty product_link, nothing to fetch");
            return ProductRecord::failure(url, EMPTY_LINK_REASON);
        }

        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let record = self.extractor.extract_html(url, &html);
                match record.product_name.as_deref() {
                    Some(name) => info!("Scraped: {}", name.chars().take(50).collect::<String>()),
                    None => info!("Scraped {} (no product name found)", url),
                }
                record
            }
            Err(e) => {
                error!("Error scraping {}: {}", url, e);
                ProductRecord::failure(url, e.to_string())
            }
        }
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!(from = ?state, to = ?next, "Run state changed");
    *state = next;
}

#[cfg(test)]
#[path = "scrape_run_test.rs"]
mod tests;
