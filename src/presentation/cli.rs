// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::image_search::SearchRequest;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

/// 命令行参数
///
/// `search <engine> <keyword> [max_num]`
#[derive(Debug, Clone, Parser)]
#[command(
    name = "search",
    version,
    about = "Search Bing or Baidu images and download them into a fresh temp directory"
)]
pub struct Cli {
    /// 搜索引擎 (bing, baidu)，不区分大小写
    pub engine: String,

    /// 搜索关键词
    #[arg(allow_hyphen_values = true)]
    pub keyword: String,

    /// 最多下载的图片数量
    pub max_num: Option<u32>,
}

/// 参数解析结果
#[derive(Debug)]
pub enum ParsedArgs {
    /// 参数完整，可以开始搜索
    Search(SearchRequest),
    /// 参数缺失或无法解析
    Usage,
}

impl Cli {
    pub fn into_request(self) -> SearchRequest {
        SearchRequest::new(self.engine, self.keyword, self.max_num)
    }
}

/// 解析命令行参数
///
/// `--help` 和 `--version` 由 clap 直接打印并退出，
/// 其余解析错误都转换为 [`ParsedArgs::Usage`]
pub fn parse_args<I, T>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParsedArgs::Search(cli.into_request()),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => ParsedArgs::Usage,
    }
}
