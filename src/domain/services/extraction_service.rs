// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product_record::ProductRecord;
use crate::domain::services::selector_rules::{
    ExtractionError, FieldRules, SelectorRule, Transform,
};
use regex::RegexBuilder;
use scraper::Html;

/// 描述字段的最大字符数
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// 从SKU区块文本中提取SKU编号
const SKU_TOKEN_PATTERN: &str = r"SKU[:\s]*([A-Za-z0-9-]+)";

/// 商品页面的全部字段规则
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub name: FieldRules,
    /// 同时填充 `sku` 与 `product_code`
    pub sku: FieldRules,
    pub price: FieldRules,
    pub availability: FieldRules,
    pub quantity: FieldRules,
    pub description: FieldRules,
}

impl ExtractionRules {
    /// 目标站点商品详情页的默认规则
    pub fn standard() -> Result<Self, ExtractionError> {
        let sku_token = RegexBuilder::new(SKU_TOKEN_PATTERN)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            name: FieldRules::new(vec![
                SelectorRule::exact("h1", "page-title")?,
                SelectorRule::pattern("h1", "class", "product.*name")?,
            ]),
            sku: FieldRules::new(vec![
                SelectorRule::exact("div", "product-info-stock-sku")?,
                SelectorRule::pattern("div", "class", "sku")?,
            ])
            .with_transform(Transform::Capture(sku_token)),
            price: FieldRules::new(vec![
                SelectorRule::exact("span", "price")?,
                SelectorRule::pattern("span", "class", "price")?,
            ]),
            availability: FieldRules::new(vec![SelectorRule::pattern(
                "div",
                "class",
                "stock|availability",
            )?]),
            quantity: FieldRules::new(vec![
                SelectorRule::attribute("input", "id", "qty")?.reading_attr("value"),
                SelectorRule::attribute("input", "name", "qty")?.reading_attr("value"),
            ]),
            description: FieldRules::new(vec![
                SelectorRule::pattern("div", "class", "product.*description")?,
                SelectorRule::attribute("div", "itemprop", "description")?,
            ])
            .with_transform(Transform::Truncate(DESCRIPTION_MAX_CHARS)),
        })
    }
}

/// 字段提取服务
///
/// 纯函数式地把已解析的商品页面转换为 [`ProductRecord`]，不做任何网络或文件操作。
/// 相同的文档总是得到相同的记录。
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    rules: ExtractionRules,
}

impl ProductExtractor {
    /// 使用默认规则创建提取器
    ///
    /// # 返回值
    ///
    /// * `Ok(ProductExtractor)` - 提取器实例
    /// * `Err(ExtractionError)` - 规则编译失败
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self::with_rules(ExtractionRules::standard()?))
    }

    pub fn with_rules(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    /// 提取商品字段
    ///
    /// # 参数
    ///
    /// * `url` - 页面来源URL
    /// * `document` - 已解析的HTML文档
    ///
    /// # 返回值
    ///
    /// 状态为成功的记录；未匹配的字段为空
    pub fn extract(&self, url: &str, document: &Html) -> ProductRecord {
        let sku = self.rules.sku.evaluate(document);

        ProductRecord {
            product_name: self.rules.name.evaluate(document),
            product_code: sku.clone(),
            sku,
            price: self.rules.price.evaluate(document),
            availability: self.rules.availability.evaluate(document),
            product_quantity: self.rules.quantity.evaluate(document),
            description: self.rules.description.evaluate(document),
            ..ProductRecord::empty(url)
        }
    }

    /// 解析HTML文本后提取
    pub fn extract_html(&self, url: &str, html: &str) -> ProductRecord {
        let document = Html::parse_document(html);
        self.extract(url, &document)
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
