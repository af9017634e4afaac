// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 存储模块
///
/// 提供结果文件的写出功能
pub mod csv_file;
