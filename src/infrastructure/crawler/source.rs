// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::CrawlError;
use reqwest::header::HeaderMap;

/// One search backend: where result pages live and how image URLs are pulled out of them.
pub trait ImageSource: Send + Sync {
    /// Engine identifier, used for logging and the crawler name
    fn name(&self) -> &'static str;

    /// Results per page; page offsets advance by this amount
    fn page_size(&self) -> u32;

    /// Full URL of the result page starting at `offset`
    fn page_url(&self, keyword: &str, offset: u32) -> String;

    /// Extra headers sent with every result page request
    fn page_headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    /// Extract image URLs from a result page body, in page order
    fn parse_page(&self, body: &str) -> Result<Vec<String>, CrawlError>;
}
