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

use async_trait::async_trait;
use thiserror::Error;

/// 页面获取错误
///
/// 错误信息会原样写入失败记录的状态中。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 请求超时
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// 连接失败
    #[error("Connection failed: {0}")]
    Connect(String),
    /// 非2xx响应状态
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },
    /// 其他请求错误（构建请求、读取响应体等）
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                code: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// 页面获取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面HTML
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
