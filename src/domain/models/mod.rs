// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 图片搜索（image_search）：搜索引擎、搜索请求和下载到的文件
/// - 搜索输出（search_output）：写到标准输出的 JSON 结果
pub mod image_search;
pub mod search_output;
