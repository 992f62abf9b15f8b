// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 搜索服务（search_service）：创建临时目录、调用爬虫并收集下载结果
pub mod search_service;
