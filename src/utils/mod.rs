// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括日志初始化、下载重试策略、结果目录的读取与清理
pub mod artifacts;
pub mod retry_policy;
pub mod telemetry;
