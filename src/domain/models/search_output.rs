// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::image_search::{DownloadedFile, ImageEngine};
use serde::Serialize;

/// 命令行用法提示
pub const USAGE: &str = "Usage: search <engine> <keyword> [max_num]";

/// 一次调用写到标准输出的 JSON 文档
///
/// 三种形态共用 `success` 字段，调用方据此和 `error` 区分结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutput {
    /// 搜索成功
    Success {
        success: bool,
        engine: String,
        keyword: String,
        requested: u32,
        downloaded: usize,
        files: Vec<DownloadedFile>,
        temp_dir: String,
    },
    /// 参数不足等用法错误
    Usage {
        success: bool,
        error: String,
        engines: Vec<String>,
    },
    /// 搜索过程中的任何失败
    Failure {
        success: bool,
        error: String,
        engine: String,
        keyword: String,
    },
}

impl SearchOutput {
    pub fn success(
        engine: ImageEngine,
        keyword: impl Into<String>,
        requested: u32,
        files: Vec<DownloadedFile>,
        temp_dir: impl Into<String>,
    ) -> Self {
        Self::Success {
            success: true,
            engine: engine.name().to_string(),
            keyword: keyword.into(),
            requested,
            downloaded: files.len(),
            files,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn failure(
        error: impl Into<String>,
        engine: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
            engine: engine.into(),
            keyword: keyword.into(),
        }
    }

    pub fn usage() -> Self {
        Self::Usage {
            success: false,
            error: USAGE.to_string(),
            engines: ImageEngine::supported_names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 进程退出码：成功为 0，其余一律为 1
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// 序列化为单行 JSON，非 ASCII 字符原样保留
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
