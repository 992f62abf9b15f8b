// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理爬虫、输出目录和日志级别的配置设置
pub mod config;

/// 领域模块
///
/// 包含图片搜索的核心实体、爬虫接口和搜索服务
pub mod domain;

/// 基础设施模块
///
/// 提供 Bing / 百度图片爬虫实现以及本地文件存储
pub mod infrastructure;

/// 表示层模块
///
/// 处理命令行参数解析和 JSON 输出
pub mod presentation;

/// 工具模块
///
/// 提供日志初始化、重试策略等通用辅助功能
pub mod utils;
