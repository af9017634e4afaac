// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 选择器规则（selector_rules）：字段规则的数据表示与求值
/// - 提取服务（extraction_service）：把商品页面转换为记录
pub mod extraction_service;
pub mod selector_rules;
