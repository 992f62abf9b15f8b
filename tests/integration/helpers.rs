// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use imgcrawlrs::config::settings::CrawlerSettings;
use imgcrawlrs::domain::crawler::engine::{CrawlerFactory, CrawlerOptions, ImageCrawler};
use imgcrawlrs::domain::models::image_search::ImageEngine;
use imgcrawlrs::infrastructure::crawler::DefaultCrawlerFactory;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01";
pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

/// 指向模拟服务器、关闭翻页间隔和重试的爬虫配置
pub fn crawler_settings(server: &MockServer, page_size: u32) -> CrawlerSettings {
    CrawlerSettings {
        request_timeout_secs: 5,
        downloader_threads: 2,
        max_retries: 0,
        page_interval_ms: 0,
        user_agent: "imgcrawlrs-test".to_string(),
        bing_base_url: server.uri(),
        bing_page_size: page_size,
        baidu_base_url: server.uri(),
        baidu_page_size: page_size,
    }
}

pub fn create_crawler(
    settings: CrawlerSettings,
    engine: ImageEngine,
    root: &Path,
) -> Box<dyn ImageCrawler> {
    DefaultCrawlerFactory::new(settings)
        .create(engine, CrawlerOptions::new(root, LevelFilter::OFF))
        .unwrap()
}

pub fn image_url(server: &MockServer, name: &str) -> String {
    format!("{}/img/{}", server.uri(), name)
}

/// 注册一个图片地址
pub async fn mount_image(server: &MockServer, name: &str, body: &[u8], content_type: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/img/{}", name)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", content_type)
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/img/{}", name)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Bing async 接口返回的单个图片块
pub fn bing_tile(murl: &str) -> String {
    let meta = serde_json::json!({ "murl": murl, "turl": "https://tse.mm.bing.net/th?id=x" });
    let escaped = meta
        .to_string()
        .replace('&', "&amp;")
        .replace('"', "&quot;");
    format!(
        r#"<li><div class="imgpt"><a class="iusc" m="{}" href="/images/search?view=detailV2"></a></div></li>"#,
        escaped
    )
}

pub fn bing_page(urls: &[String]) -> String {
    let tiles: String = urls.iter().map(|url| bing_tile(url)).collect();
    format!(r#"<ul class="dgControl_list">{}</ul>"#, tiles)
}

/// 目录下的文件名，按字母序
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
