// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::CrawlError;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::infrastructure::crawler::http::send_with_retry;
use crate::infrastructure::crawler::image_format::ImageFormat;
use crate::utils::retry_policy::RetryPolicy;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, level_filters::LevelFilter, Level};
use url::Url;

/// 文件序号分配器
///
/// 保证写入磁盘的图片不超过上限，且序号从 1 开始连续分配
#[derive(Debug)]
pub struct DownloadSlots {
    max: u32,
    filled: AtomicU32,
}

impl DownloadSlots {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            filled: AtomicU32::new(0),
        }
    }

    pub fn is_full(&self) -> bool {
        self.filled.load(Ordering::SeqCst) >= self.max
    }

    pub fn filled(&self) -> u32 {
        self.filled.load(Ordering::SeqCst)
    }

    /// 预留下一个序号，已满时返回 None
    pub fn reserve(&self) -> Option<u32> {
        self.filled
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.max).then_some(n + 1)
            })
            .ok()
            .map(|previous| previous + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadOutcome {
    Saved,
    Skipped,
    NotAttempted,
}

/// 一批下载的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub saved: u32,
    pub skipped: u32,
}

/// 图片下载器
///
/// 并发下载候选地址，只保留能识别出格式的图片，
/// 以 `{序号:06}.{扩展名}` 命名写入存储
pub struct ImageDownloader {
    client: reqwest::Client,
    storage: Arc<dyn StorageRepository>,
    retry: RetryPolicy,
    threads: usize,
    log_level: LevelFilter,
}

impl ImageDownloader {
    pub fn new(
        client: reqwest::Client,
        storage: Arc<dyn StorageRepository>,
        retry: RetryPolicy,
        threads: usize,
        log_level: LevelFilter,
    ) -> Self {
        Self {
            client,
            storage,
            retry,
            threads: threads.max(1),
            log_level,
        }
    }

    /// 下载一批地址，直到全部处理完或序号用完
    ///
    /// 网络失败和非图片响应只会被跳过；存储写入失败会中止整批并返回错误
    pub async fn download_all(
        &self,
        urls: Vec<String>,
        slots: &DownloadSlots,
    ) -> Result<BatchOutcome, CrawlError> {
        let results: Vec<Result<DownloadOutcome, CrawlError>> = stream::iter(urls)
            .map(|url| async move { self.download_one(&url, slots).await })
            .buffer_unordered(self.threads)
            .collect()
            .await;

        let mut outcome = BatchOutcome::default();
        for result in results {
            match result? {
                DownloadOutcome::Saved => outcome.saved += 1,
                DownloadOutcome::Skipped => outcome.skipped += 1,
                DownloadOutcome::NotAttempted => {}
            }
        }

        Ok(outcome)
    }

    async fn download_one(
        &self,
        url: &str,
        slots: &DownloadSlots,
    ) -> Result<DownloadOutcome, CrawlError> {
        if slots.is_full() {
            return Ok(DownloadOutcome::NotAttempted);
        }

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                if self.enabled(Level::DEBUG) {
                    debug!("Skipping unsupported image URL: {}", url);
                }
                return Ok(DownloadOutcome::Skipped);
            }
        }

        let bytes = match self.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if self.enabled(Level::DEBUG) {
                    debug!("Failed to download {}: {}", url, e);
                }
                return Ok(DownloadOutcome::Skipped);
            }
        };

        let Some(format) = ImageFormat::sniff(&bytes) else {
            if self.enabled(Level::DEBUG) {
                debug!("Response from {} is not a recognised image", url);
            }
            return Ok(DownloadOutcome::Skipped);
        };

        let Some(index) = slots.reserve() else {
            return Ok(DownloadOutcome::NotAttempted);
        };

        let filename = format!("{:06}.{}", index, format.extension());
        self.storage.save(&filename, &bytes).await?;

        if self.enabled(Level::INFO) {
            info!("Saved image #{} from {}", index, url);
        }

        Ok(DownloadOutcome::Saved)
    }

    fn enabled(&self, level: Level) -> bool {
        level <= self.log_level
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CrawlError> {
        let response = send_with_retry(|| self.client.get(url), &self.retry, self.log_level).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
