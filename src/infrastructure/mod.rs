// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// - 图片爬虫（crawler）：Bing / 百度图片搜索的分页抓取与并发下载
/// - 存储（storage）：把下载的图片写入本地目录
pub mod crawler;
pub mod storage;
