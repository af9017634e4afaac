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

use crate::engines::session::SessionContext;
use crate::engines::traits::{FetchError, PageFetcher};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// 抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎。整个运行期间复用同一个客户端，
/// 请求头与Cookie在构造时固定。
pub struct ReqwestEngine {
    client: reqwest::Client,
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Request(format!("Invalid header value `{}`: {}", value, e)))
}

impl ReqwestEngine {
    /// 根据会话上下文创建引擎
    ///
    /// # 参数
    ///
    /// * `session` - 会话上下文（请求头、Cookie、超时）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎
    /// * `Err(FetchError)` - 请求头、Cookie作用域或客户端构建失败
    pub fn new(session: &SessionContext) -> Result<Self, FetchError> {
        // Build headers
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&session.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&session.accept_language)?);
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        // Host-only cookies scoped to the target site
        let cookie_url = Url::parse(&session.cookie_url).map_err(|e| {
            FetchError::Request(format!("Invalid cookie url `{}`: {}", session.cookie_url, e))
        })?;
        let jar = Jar::default();
        for cookie in &session.cookies {
            jar.add_cookie_str(&cookie.header_value(), &cookie_url);
        }

        let client = reqwest::Client::builder()
            .user_agent(session.user_agent.as_str())
            .default_headers(headers)
            .cookie_provider(Arc::new(jar))
            .timeout(session.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 执行HTTP GET
    ///
    /// 超时、连接失败以及跟随重定向后的非2xx状态都会转换为 [`FetchError`]。
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let status_code = response.status().as_u16();
        let content = response.text().await?;

        debug!(
            url = url,
            status = status_code,
            bytes = content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );

        Ok(content)
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
