// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 图片爬虫接口
///
/// 定义外部爬虫的构造参数、`crawl` 契约和错误类型
pub mod engine;
