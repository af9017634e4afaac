// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product_record::{ProductRecord, RECORD_COLUMNS};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// 输出错误
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV序列化失败
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// 文件写入失败
    #[error("Cannot write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// CSV文件写入端
///
/// 运行结束时一次性写出全部记录：先写入同目录下的临时文件，
/// 再重命名为最终文件，不会留下写了一半的输出。
#[derive(Debug, Clone)]
pub struct CsvRecordWriter {
    output_dir: PathBuf,
}

impl CsvRecordWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 带运行时间戳的输出文件路径
    pub fn output_path(&self, started_at: DateTime<Local>) -> PathBuf {
        self.output_dir.join(format!(
            "scraped_products_{}.csv",
            started_at.format("%Y%m%d_%H%M%S")
        ))
    }

    /// 把记录序列化为CSV（含表头）
    pub fn render(records: &[ProductRecord]) -> Result<Vec<u8>, OutputError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(RECORD_COLUMNS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }

    /// 写出全部记录
    ///
    /// # 参数
    ///
    /// * `path` - 目标文件路径
    /// * `records` - 本次运行的全部记录
    pub async fn write_all(&self, path: &Path, records: &[ProductRecord]) -> Result<(), OutputError> {
        let data = Self::render(records)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, &data).await?;
        fs::rename(&tmp_path, path).await?;

        Ok(())
    }
}
