// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::text::{element_text, non_empty, truncate_chars};
use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// 提取规则错误
///
/// 仅在构造规则时出现；规则在文档中找不到元素不是错误。
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 无效的CSS选择器
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
    /// 无效的正则表达式
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// 规则类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// 标签 + 精确的class名
    Exact { tag: String, class: String },
    /// 标签 + 属性值正则匹配（不区分大小写）
    Pattern {
        tag: String,
        attr: String,
        pattern: String,
    },
    /// 标签 + 属性值相等
    Attribute {
        tag: String,
        name: String,
        value: String,
    },
}

/// 取值方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// 元素文本
    #[default]
    Text,
    /// 指定属性的值
    Attr(String),
}

/// 选择器规则
///
/// 在文档中定位一个元素并读取其值。规则在构造时完成编译，
/// 之后对任意文档求值都不会失败。
#[derive(Debug, Clone)]
pub struct SelectorRule {
    kind: RuleKind,
    selector: Selector,
    pattern: Option<Regex>,
    source: ValueSource,
}

fn compile_selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

impl SelectorRule {
    /// 精确匹配：`tag` 元素的class列表中包含 `class`
    pub fn exact(tag: &str, class: &str) -> Result<Self, ExtractionError> {
        Ok(Self {
            selector: compile_selector(&format!("{}.{}", tag, class))?,
            kind: RuleKind::Exact {
                tag: tag.to_string(),
                class: class.to_string(),
            },
            pattern: None,
            source: ValueSource::Text,
        })
    }

    /// 模式匹配：`tag` 元素的 `attr` 属性值中可以找到 `pattern`（不区分大小写）
    pub fn pattern(tag: &str, attr: &str, pattern: &str) -> Result<Self, ExtractionError> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            selector: compile_selector(&format!("{}[{}]", tag, attr))?,
            kind: RuleKind::Pattern {
                tag: tag.to_string(),
                attr: attr.to_string(),
                pattern: pattern.to_string(),
            },
            pattern: Some(regex),
            source: ValueSource::Text,
        })
    }

    /// 属性匹配：`tag` 元素的 `name` 属性等于 `value`
    pub fn attribute(tag: &str, name: &str, value: &str) -> Result<Self, ExtractionError> {
        Ok(Self {
            selector: compile_selector(&format!("{}[{}=\"{}\"]", tag, name, value))?,
            kind: RuleKind::Attribute {
                tag: tag.to_string(),
                name: name.to_string(),
                value: value.to_string(),
            },
            pattern: None,
            source: ValueSource::Text,
        })
    }

    /// 改为读取属性值而不是文本
    pub fn reading_attr(mut self, attr: &str) -> Self {
        self.source = ValueSource::Attr(attr.to_string());
        self
    }

    /// 返回文档中第一个满足规则的元素
    pub fn select_first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let mut candidates = document.select(&self.selector);
        match (&self.pattern, &self.kind) {
            (Some(regex), RuleKind::Pattern { attr, .. }) => candidates.find(|el| {
                el.value()
                    .attr(attr)
                    .is_some_and(|value| regex.is_match(value))
            }),
            _ => candidates.next(),
        }
    }

    /// 对文档求值，得到去除首尾空白后的非空值
    pub fn evaluate(&self, document: &Html) -> Option<String> {
        let element = self.select_first(document)?;
        let raw = match &self.source {
            ValueSource::Text => element_text(&element),
            ValueSource::Attr(name) => element
                .value()
                .attr(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        };
        non_empty(raw)
    }
}

/// 取值后的处理
#[derive(Debug, Clone, Default)]
pub enum Transform {
    /// 原样保留
    #[default]
    Identity,
    /// 取正则第一个捕获组
    Capture(Regex),
    /// 按字符数截断并追加省略号
    Truncate(usize),
}

impl Transform {
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            Transform::Identity => non_empty(value.to_string()),
            Transform::Capture(regex) => regex
                .captures(value)
                .and_then(|caps| caps.get(1))
                .and_then(|m| non_empty(m.as_str().trim().to_string())),
            Transform::Truncate(max_chars) => non_empty(truncate_chars(value, *max_chars)),
        }
    }
}

/// 单个字段的有序规则列表
///
/// 依次尝试每条规则，第一个产生非空结果的规则生效；
/// 全部落空时字段为空。
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    pub rules: Vec<SelectorRule>,
    pub transform: Transform,
}

impl FieldRules {
    pub fn new(rules: Vec<SelectorRule>) -> Self {
        Self {
            rules,
            transform: Transform::Identity,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn evaluate(&self, document: &Html) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.evaluate(document)
                .and_then(|value| self.transform.apply(&value))
        })
    }
}
