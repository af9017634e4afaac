// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 输出列顺序，CSV文件与数据库表共用
pub const RECORD_COLUMNS: [&str; 9] = [
    "url",
    "product_name",
    "product_code",
    "sku",
    "price",
    "availability",
    "product_quantity",
    "description",
    "status",
];

/// 抓取状态
///
/// 每条记录恰好处于其中一种状态：成功提取，或抓取失败并携带错误信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeStatus {
    /// 页面获取成功并完成字段提取（即使所有字段均为空）
    Success,
    /// 页面获取失败，携带底层错误信息
    Failure(String),
}

impl ScrapeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeStatus::Success)
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScrapeStatus::Success => write!(f, "success"),
            ScrapeStatus::Failure(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// 商品记录
///
/// 每个输入URL对应一条记录。所有提取字段均为可选值，
/// 未匹配到任何规则时为 `None`，不会出现空字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// 来源URL
    pub url: String,
    /// 商品名称
    pub product_name: Option<String>,
    /// 商品编码，与SKU取值相同
    pub product_code: Option<String>,
    /// SKU
    pub sku: Option<String>,
    /// 价格原文，不做货币解析
    pub price: Option<String>,
    /// 库存状态原文
    pub availability: Option<String>,
    /// 数量输入框的默认值
    pub product_quantity: Option<String>,
    /// 商品描述，超过200字符时截断
    pub description: Option<String>,
    /// 抓取状态
    pub status: ScrapeStatus,
}

impl ProductRecord {
    /// 创建一条所有字段为空的成功记录
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            product_name: None,
            product_code: None,
            sku: None,
            price: None,
            availability: None,
            product_quantity: None,
            description: None,
            status: ScrapeStatus::Success,
        }
    }

    /// 创建失败记录
    ///
    /// # 参数
    ///
    /// * `url` - 来源URL
    /// * `reason` - 失败原因，原样写入状态
    pub fn failure(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status: ScrapeStatus::Failure(reason.into()),
            ..Self::empty(url)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 按 [`RECORD_COLUMNS`] 的顺序返回字段值，空字段为 `None`
    pub fn field_values(&self) -> [Option<&str>; 8] {
        [
            Some(self.url.as_str()),
            self.product_name.as_deref(),
            self.product_code.as_deref(),
            self.sku.as_deref(),
            self.price.as_deref(),
            self.availability.as_deref(),
            self.product_quantity.as_deref(),
            self.description.as_deref(),
        ]
    }

    /// 生成一行CSV数据，空字段写为空字符串
    pub fn to_row(&self) -> Vec<String> {
        let mut row: Vec<String> = self
            .field_values()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        row.push(self.status.to_string());
        row
    }
}
