// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::{CrawlError, CrawlStats, ImageCrawler};
use crate::infrastructure::crawler::downloader::{DownloadSlots, ImageDownloader};
use crate::infrastructure::crawler::http::send_with_retry;
use crate::infrastructure::crawler::source::ImageSource;
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, level_filters::LevelFilter, warn, Level};

/// 分页图片爬虫
///
/// 按页请求搜索结果，由 [`ImageSource`] 解析出图片地址，再交给下载器。
/// 在下载数达到上限、某页没有新地址或页数用完时停止。
pub struct PagedCrawler<S: ImageSource> {
    source: S,
    client: reqwest::Client,
    downloader: ImageDownloader,
    page_retry: RetryPolicy,
    page_interval: Duration,
    log_level: LevelFilter,
}

impl<S: ImageSource> PagedCrawler<S> {
    pub fn new(
        source: S,
        client: reqwest::Client,
        downloader: ImageDownloader,
        page_retry: RetryPolicy,
        page_interval: Duration,
        log_level: LevelFilter,
    ) -> Self {
        Self {
            source,
            client,
            downloader,
            page_retry,
            page_interval,
            log_level,
        }
    }

    /// 最多请求的页数
    ///
    /// 按两倍上限估算，给下载失败的地址留出余量
    pub fn max_pages(&self, max_num: u32) -> u32 {
        max_num
            .saturating_mul(2)
            .div_ceil(self.source.page_size())
            .max(1)
    }

    async fn fetch_page(&self, keyword: &str, offset: u32) -> Result<Vec<String>, CrawlError> {
        let url = self.source.page_url(keyword, offset);
        if self.enabled(Level::DEBUG) {
            debug!("Fetching {} result page: {}", self.source.name(), url);
        }

        let response = send_with_retry(
            || self.client.get(&url).headers(self.source.page_headers()),
            &self.page_retry,
            self.log_level,
        )
        .await?;
        let body = response.text().await?;

        self.source.parse_page(&body)
    }

    /// 翻页之间的随机间隔，避免请求过于密集
    async fn pace(&self) {
        if self.page_interval.is_zero() {
            return;
        }
        let base = self.page_interval.as_millis() as u64;
        let jitter = rand::random_range(0..=base / 2);
        tokio::time::sleep(Duration::from_millis(base + jitter)).await;
    }

    fn enabled(&self, level: Level) -> bool {
        level <= self.log_level
    }
}

#[async_trait]
impl<S: ImageSource + 'static> ImageCrawler for PagedCrawler<S> {
    async fn crawl(&self, keyword: &str, max_num: u32) -> Result<CrawlStats, CrawlError> {
        let mut stats = CrawlStats::default();
        if max_num == 0 {
            return Ok(stats);
        }

        let slots = DownloadSlots::new(max_num);
        let mut seen = HashSet::new();
        let mut last_error = None;

        for page in 0..self.max_pages(max_num) {
            if slots.is_full() {
                break;
            }
            if page > 0 {
                self.pace().await;
            }

            let offset = page.saturating_mul(self.source.page_size());
            let urls = match self.fetch_page(keyword, offset).await {
                Ok(urls) => urls,
                Err(e) => {
                    if self.enabled(Level::WARN) {
                        warn!("{} result page at offset {} failed: {}", self.source.name(), offset, e);
                    }
                    stats.pages_failed += 1;
                    last_error = Some(e);
                    continue;
                }
            };
            stats.pages_fetched += 1;

            let fresh: Vec<String> = urls.into_iter().filter(|url| seen.insert(url.clone())).collect();
            if fresh.is_empty() {
                if self.enabled(Level::DEBUG) {
                    debug!("No new images at offset {}, stopping", offset);
                }
                break;
            }
            stats.candidates += fresh.len();

            let outcome = self.downloader.download_all(fresh, &slots).await?;
            stats.skipped += outcome.skipped;
        }

        stats.downloaded = slots.filled();

        if stats.pages_fetched == 0 {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        if self.enabled(Level::INFO) {
            info!(
                "{} crawl for {:?} finished: {} of {} images saved",
                self.source.name(),
                keyword,
                stats.downloaded,
                max_num
            );
        }

        Ok(stats)
    }

    fn name(&self) -> &'static str {
        self.source.name()
    }
}
