// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 默认目标站点，会话Cookie只发送给该主机
pub const DEFAULT_COOKIE_URL: &str = "https://globepestsolutions.com.au/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 会话Cookie
///
/// 仅作用于 [`SessionContext::cookie_url`] 对应的主机（host-only）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Set-Cookie 格式
    pub fn header_value(&self) -> String {
        format!("{}={}; Path=/", self.name, self.value)
    }
}

/// 会话上下文
///
/// 一次运行内所有请求共用同一组请求头与Cookie，不做轮换或刷新。
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub cookie_url: String,
    pub cookies: Vec<SessionCookie>,
    pub timeout: Duration,
}

impl SessionContext {
    /// 站点默认的三个会话Cookie
    pub fn default_cookies() -> Vec<SessionCookie> {
        vec![
            SessionCookie::new("private_content_version", "a6161d27118097280a9f95b01ff6abd2"),
            SessionCookie::new(
                "X-Magento-Vary",
                "180fe87cb4ab2ad02d8269c19f79d5ee002eb527c9653c18b8f2ae41fb8f0526",
            ),
            SessionCookie::new(
                "persistent_shopping_cart",
                "7JBLBYlNsdZzkaCgHviQVkseMeX2RhiY4A6Bis7X4oK1KPsURN",
            ),
        ]
    }

    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = cookie_url.into();
        self
    }

    pub fn with_cookies(mut self, cookies: Vec<SessionCookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            cookies: Self::default_cookies(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
