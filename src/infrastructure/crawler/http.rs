// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::CrawlError;
use crate::utils::retry_policy::{is_retryable_error, is_retryable_status, RetryPolicy};
use std::time::Duration;
use tracing::{debug, level_filters::LevelFilter, Level};

/// 创建爬虫共用的 HTTP 客户端
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, CrawlError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .cookie_store(true)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| CrawlError::ConfigError(format!("failed to build HTTP client: {}", e)))
}

/// 发送请求并在可重试的失败上按策略退避重试
///
/// `build` 每次尝试都会被调用一次，以便重新构造请求。
/// 只有 2xx 响应会被返回，其余状态码在重试用尽后转换为 `NetworkError`。
pub async fn send_with_retry<F>(
    build: F,
    retry: &RetryPolicy,
    log_level: LevelFilter,
) -> Result<reqwest::Response, CrawlError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        let (retryable, error) = match build().send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                (
                    is_retryable_status(status),
                    CrawlError::NetworkError(format!("{} returned status {}", response.url(), status)),
                )
            }
            Err(e) => (is_retryable_error(&e), CrawlError::from(e)),
        };

        if !retryable || !retry.should_retry(attempt) {
            return Err(error);
        }

        attempt += 1;
        let backoff = retry.calculate_backoff(attempt);
        if Level::DEBUG <= log_level {
            debug!("Request attempt {} failed: {}, retrying in {:?}", attempt, error, backoff);
        }
        tokio::time::sleep(backoff).await;
    }
}
