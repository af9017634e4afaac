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

use product_scraper::application::use_cases::scrape_run::{RunConfig, ScrapeRunUseCase};
use product_scraper::config::settings::Settings;
use product_scraper::domain::repositories::product_record_repository::ProductRecordRepository;
use product_scraper::infrastructure::database::connection;
use product_scraper::infrastructure::repositories::product_record_repo_impl::ProductRecordRepositoryImpl;
use product_scraper::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 主函数
///
/// 用法：`product-scraper [INPUT_CSV]`，参数覆盖配置中的输入文件路径
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting product-scraper...");

    // 2. Load configuration
    let settings = Settings::new()?;
    let input_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&settings.scraper.input_path));
    info!("Configuration loaded");

    // 3. Connect to database
    let repository: Option<Arc<dyn ProductRecordRepository>> =
        match connection::create_pool(&settings.database).await {
            Ok(Some(db)) => {
                info!("Database connection established");
                Some(Arc::new(ProductRecordRepositoryImpl::new(
                    Arc::new(db),
                    settings.database.table_name(),
                )))
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to connect to database: {}; continuing with CSV only", e);
                None
            }
        };

    // 4. Run
    let use_case = ScrapeRunUseCase::from_config(RunConfig::from_settings(&settings), repository)?;
    match use_case.run(&input_path).await {
        Ok(Some(summary)) => info!(
            "Finished: {} scraped, {} failed, output {}",
            summary.succeeded,
            summary.failed,
            summary.output_path.display()
        ),
        Ok(None) => warn!("Nothing to do for {}", input_path.display()),
        Err(e) => error!("Run failed: {}", e),
    }

    Ok(())
}
