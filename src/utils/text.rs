// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::ElementRef;

/// 截断标记
pub const ELLIPSIS: &str = "...";

/// 收集元素的文本内容
///
/// 每个文本节点先去除首尾空白再直接拼接（不插入分隔符），
/// 最后整体去除首尾空白。
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<String>()
        .trim()
        .to_string()
}

/// 按字符数截断文本
///
/// 文本长度超过 `max_chars` 时保留前 `max_chars` 个字符并追加 [`ELLIPSIS`]，
/// 否则原样返回。
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// 空字符串视为缺失
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
