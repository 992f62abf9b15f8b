// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::crawler::engine::{CrawlError, CrawlerFactory, CrawlerOptions, ImageCrawler};
use crate::domain::models::image_search::ImageEngine;
use crate::infrastructure::crawler::baidu::BaiduImageSource;
use crate::infrastructure::crawler::bing::BingImageSource;
use crate::infrastructure::crawler::downloader::ImageDownloader;
use crate::infrastructure::crawler::http::build_client;
use crate::infrastructure::crawler::paged::PagedCrawler;
use crate::infrastructure::crawler::source::ImageSource;
use crate::infrastructure::storage::LocalStorage;
use crate::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, Level};

/// 爬虫工厂
///
/// 按引擎创建分页爬虫，图片写入 `CrawlerOptions::storage_root`
#[derive(Debug, Clone, Default)]
pub struct DefaultCrawlerFactory {
    settings: CrawlerSettings,
}

impl DefaultCrawlerFactory {
    pub fn new(settings: CrawlerSettings) -> Self {
        Self { settings }
    }

    fn build<S: ImageSource + 'static>(
        &self,
        source: S,
        options: CrawlerOptions,
    ) -> Result<Box<dyn ImageCrawler>, CrawlError> {
        let client = build_client(&self.settings.user_agent, self.settings.request_timeout())?;
        let retry = RetryPolicy::for_downloads(self.settings.max_retries);
        let storage = Arc::new(LocalStorage::new(options.storage_root));

        let downloader = ImageDownloader::new(
            client.clone(),
            storage,
            retry.clone(),
            self.settings.downloader_threads,
            options.log_level,
        );

        Ok(Box::new(PagedCrawler::new(
            source,
            client,
            downloader,
            retry,
            Duration::from_millis(self.settings.page_interval_ms),
            options.log_level,
        )))
    }
}

impl CrawlerFactory for DefaultCrawlerFactory {
    fn create(
        &self,
        engine: ImageEngine,
        options: CrawlerOptions,
    ) -> Result<Box<dyn ImageCrawler>, CrawlError> {
        if Level::DEBUG <= options.log_level {
            debug!(
                "Creating {} crawler with storage root {}",
                engine,
                options.storage_root.display()
            );
        }

        match engine {
            ImageEngine::Bing => self.build(
                BingImageSource::new(&self.settings.bing_base_url, self.settings.bing_page_size)?,
                options,
            ),
            ImageEngine::Baidu => self.build(
                BaiduImageSource::new(&self.settings.baidu_base_url, self.settings.baidu_page_size),
                options,
            ),
        }
    }
}
