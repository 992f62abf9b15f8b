// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::image_search::ImageEngine;
use crate::domain::repositories::storage_repository::StorageError;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Blocked by {0}: verification page returned")]
    Blocked(&'static str),
    #[error("Crawler configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for CrawlError {
    fn from(err: reqwest::Error) -> Self {
        CrawlError::NetworkError(err.to_string())
    }
}

/// 构造爬虫所需的参数
#[derive(Debug, Clone)]
pub struct CrawlerOptions {
    /// 图片保存的根目录
    pub storage_root: PathBuf,
    /// 爬虫自身日志的最低级别
    pub log_level: LevelFilter,
}

impl CrawlerOptions {
    pub fn new(storage_root: impl Into<PathBuf>, log_level: LevelFilter) -> Self {
        Self {
            storage_root: storage_root.into(),
            log_level,
        }
    }
}

/// 一次爬取的统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// 成功获取的结果页数
    pub pages_fetched: u32,
    /// 获取失败或被拦截的结果页数
    pub pages_failed: u32,
    /// 解析出的候选图片地址数
    pub candidates: usize,
    /// 保存到磁盘的图片数
    pub downloaded: u32,
    /// 下载失败或不是图片而被跳过的地址数
    pub skipped: u32,
}

#[async_trait]
pub trait ImageCrawler: Send + Sync {
    /// Crawl images for `keyword` into the storage root, returning once every
    /// kept image has been written to disk.
    async fn crawl(&self, keyword: &str, max_num: u32) -> Result<CrawlStats, CrawlError>;

    /// Get the name of the search engine
    fn name(&self) -> &'static str;
}

/// 按引擎构造爬虫
pub trait CrawlerFactory: Send + Sync {
    fn create(
        &self,
        engine: ImageEngine,
        options: CrawlerOptions,
    ) -> Result<Box<dyn ImageCrawler>, CrawlError>;
}
