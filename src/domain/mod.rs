// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含图片搜索的核心业务逻辑，包括：
/// - 领域模型（models）：搜索请求、下载文件和输出结果
/// - 爬虫接口（crawler）：外部图片爬虫的抽象契约
/// - 仓库接口（repositories）：图片文件存储的抽象接口
/// - 服务（services）：一次搜索调用的完整流程
pub mod crawler;
pub mod models;
pub mod repositories;
pub mod services;
