// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 输入文件中的URL列名
pub const PRODUCT_LINK_COLUMN: &str = "product_link";

/// 输入错误
///
/// 输入阶段的错误会在开始抓取之前终止整个运行。
#[derive(Error, Debug)]
pub enum InputError {
    /// 文件无法读取
    #[error("Cannot read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// CSV格式错误
    #[error("Malformed input file: {0}")]
    Csv(#[from] csv::Error),
    /// 缺少必需的列
    #[error("Input file is missing the `{0}` column")]
    MissingColumn(&'static str),
}

/// 从CSV数据中解析商品链接
///
/// 每个数据行对应一个条目，顺序与文件一致。空白单元格保留为空字符串，
/// 由运行阶段记为失败记录。列数不齐的行按表头位置取值。
pub fn parse_product_links(data: &[u8]) -> Result<Vec<String>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == PRODUCT_LINK_COLUMN)
        .ok_or(InputError::MissingColumn(PRODUCT_LINK_COLUMN))?;

    let mut links = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let link = row?.get(column).unwrap_or_default().to_string();
        if link.is_empty() {
            // Header is line 1
            warn!("Row {} has an empty {}", index + 2, PRODUCT_LINK_COLUMN);
        }
        links.push(link);
    }

    Ok(links)
}

/// 读取输入文件中的商品链接
///
/// # 参数
///
/// * `path` - 输入CSV文件路径
///
/// # 返回值
///
/// * `Ok(Vec<String>)` - 按文件顺序排列的URL列表
/// * `Err(InputError)` - 文件缺失、格式错误或缺少 `product_link` 列
pub async fn load_product_links(path: &Path) -> Result<Vec<String>, InputError> {
    let data = tokio::fs::read(path).await.map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let links = parse_product_links(&data)?;
    info!("Loaded {} product links from {}", links.len(), path.display());
    Ok(links)
}
