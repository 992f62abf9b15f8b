// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 未指定数量时的默认下载上限
pub const DEFAULT_MAX_NUM: u32 = 10;

/// 图片搜索引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageEngine {
    /// Bing 图片搜索
    Bing,
    /// 百度图片搜索
    Baidu,
}

impl ImageEngine {
    /// 所有支持的引擎，按对外展示的顺序排列
    pub const ALL: [ImageEngine; 2] = [ImageEngine::Bing, ImageEngine::Baidu];

    /// 获取引擎名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bing => "bing",
            Self::Baidu => "baidu",
        }
    }

    /// 支持的引擎名称列表
    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|engine| engine.name()).collect()
    }
}

impl fmt::Display for ImageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 无法识别的引擎名称
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown engine: {0}. Supported: bing, baidu")]
pub struct UnknownEngine(pub String);

impl FromStr for ImageEngine {
    type Err = UnknownEngine;

    /// 从字符串解析引擎类型（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bing" => Ok(Self::Bing),
            "baidu" => Ok(Self::Baidu),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

/// 一次图片搜索请求
///
/// `engine` 保留调用方给出的原始名称（已转为小写），
/// 在搜索服务中才会被解析为 [`ImageEngine`]，这样未知引擎也能原样回显在错误结果里。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub engine: String,
    pub keyword: String,
    pub max_num: u32,
}

impl SearchRequest {
    pub fn new(engine: impl Into<String>, keyword: impl Into<String>, max_num: Option<u32>) -> Self {
        Self {
            engine: engine.into().to_lowercase(),
            keyword: keyword.into(),
            max_num: max_num.unwrap_or(DEFAULT_MAX_NUM),
        }
    }
}

/// 爬取完成后在临时目录中发现的一个文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedFile {
    /// 文件的绝对路径
    pub path: String,
    /// 文件名
    pub filename: String,
    /// 文件大小（字节）
    pub size: u64,
}
