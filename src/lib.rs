// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含抓取运行的编排逻辑
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含商品记录、字段提取规则和仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现页面获取引擎与HTTP会话
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库、输入文件、输出文件等
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
