// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::*;
use imgcrawlrs::config::settings::OutputSettings;
use imgcrawlrs::domain::models::image_search::SearchRequest;
use imgcrawlrs::domain::models::search_output::SearchOutput;
use imgcrawlrs::domain::services::search_service::SearchService;
use imgcrawlrs::infrastructure::crawler::DefaultCrawlerFactory;
use imgcrawlrs::utils::artifacts::{cleanup_temp_dir, read_image_as_data_uri};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, root: &TempDir) -> SearchService<DefaultCrawlerFactory> {
    let output = OutputSettings {
        temp_prefix: "imgcrawl".to_string(),
        temp_root: Some(root.path().to_string_lossy().into_owned()),
    };
    SearchService::new(
        DefaultCrawlerFactory::new(crawler_settings(server, 10)),
        output,
        LevelFilter::OFF,
    )
}

#[tokio::test]
async fn test_bing_search_end_to_end() {
    let server = MockServer::start().await;
    mount_image(&server, "1.png", PNG, "image/png").await;
    mount_image(&server, "2.jpg", JPEG, "image/jpeg").await;
    mount_status(&server, "3.jpg", 503).await;

    let urls: Vec<String> = ["1.png", "2.jpg", "3.jpg"]
        .iter()
        .map(|name| image_url(&server, name))
        .collect();
    Mock::given(method("GET"))
        .and(path("/images/async"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bing_page(&urls)))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let output = service(&server, &root)
        .search(&SearchRequest::new("BING", "小猫", Some(5)))
        .await;
    assert_eq!(output.exit_code(), 0);

    let value: Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
    assert_eq!(value["success"], Value::Bool(true));
    assert_eq!(value["engine"], "bing");
    assert_eq!(value["keyword"], "小猫");
    assert_eq!(value["requested"], 5);
    assert_eq!(value["downloaded"], 2);

    let temp_dir = PathBuf::from(value["temp_dir"].as_str().unwrap());
    assert!(temp_dir.starts_with(root.path()));
    assert!(temp_dir.is_dir());

    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0]["filename"].as_str().unwrap().starts_with("000001."));
    assert!(files[1]["filename"].as_str().unwrap().starts_with("000002."));
    for file in files {
        let path = PathBuf::from(file["path"].as_str().unwrap());
        assert_eq!(path.parent().unwrap(), temp_dir.as_path());
        assert_eq!(
            file["size"].as_u64().unwrap(),
            std::fs::metadata(&path).unwrap().len()
        );
    }

    // 调用方可以把结果转成 data URI，再清理临时目录
    let first = PathBuf::from(files[0]["path"].as_str().unwrap());
    let data_uri = read_image_as_data_uri(&first).await.unwrap();
    assert!(data_uri.starts_with("data:image/"));

    cleanup_temp_dir(&temp_dir).await.unwrap();
    assert!(!temp_dir.exists());
}

#[tokio::test]
async fn test_unreachable_engine_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/acjson"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let output = service(&server, &root)
        .search(&SearchRequest::new("baidu", "cat", Some(3)))
        .await;

    match &output {
        SearchOutput::Failure {
            success,
            error,
            engine,
            keyword,
        } => {
            assert!(!success);
            assert!(error.starts_with("Network error:"), "unexpected error {}", error);
            assert!(error.contains("500"));
            assert_eq!(engine, "baidu");
            assert_eq!(keyword, "cat");
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(output.exit_code(), 1);
}
