// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::CrawlError;
use crate::infrastructure::crawler::source::ImageSource;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use serde::Deserialize;

/// Metadata Bing embeds in the `m` attribute of every image tile
#[derive(Debug, Deserialize)]
struct BingImageMeta {
    /// Full-size image URL
    murl: Option<String>,
}

/// Bing image search
///
/// Result pages come from the async tile endpoint (`/images/async`), which
/// returns an HTML fragment of `a.iusc` tiles without the surrounding page.
/// Pagination uses `first` (0-based offset) and `count`.
pub struct BingImageSource {
    base_url: String,
    page_size: u32,
    tile_selector: Selector,
}

impl BingImageSource {
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Result<Self, CrawlError> {
        let tile_selector = Selector::parse("a.iusc")
            .map_err(|e| CrawlError::ConfigError(format!("invalid Bing tile selector: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            page_size: page_size.max(1),
            tile_selector,
        })
    }

    /// Build Bing async image URL
    ///
    /// # Arguments
    /// * `query` - Search keyword
    /// * `offset` - 0-based index of the first tile
    pub fn build_bing_url(&self, query: &str, offset: u32) -> String {
        let params = [
            ("q", query.to_string()),
            ("first", offset.to_string()),
            ("count", self.page_size.to_string()),
            ("mmasync", "1".to_string()),
        ];

        format!(
            "{}/images/async?{}",
            self.base_url.trim_end_matches('/'),
            serde_urlencoded::to_string(&params).unwrap_or_default()
        )
    }

    fn is_blocked(&self, html: &str) -> bool {
        html.contains("<title>Robot Check</title>") || html.contains("id=\"b_captcha\"")
    }
}

impl ImageSource for BingImageSource {
    fn name(&self) -> &'static str {
        "bing"
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn page_url(&self, keyword: &str, offset: u32) -> String {
        self.build_bing_url(keyword, offset)
    }

    fn page_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9,zh-CN;q=0.8"),
        );
        headers
    }

    fn parse_page(&self, html: &str) -> Result<Vec<String>, CrawlError> {
        if self.is_blocked(html) {
            return Err(CrawlError::Blocked("bing"));
        }

        let document = Html::parse_fragment(html);
        let urls = document
            .select(&self.tile_selector)
            .filter_map(|tile| tile.value().attr("m"))
            .filter_map(|meta| serde_json::from_str::<BingImageMeta>(meta).ok())
            .filter_map(|meta| meta.murl)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();

        Ok(urls)
    }
}
