// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 商品记录（product_record）：每个输入URL对应的一条抓取结果
pub mod product_record;
