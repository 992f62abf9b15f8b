// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::OutputSettings;
use crate::domain::crawler::engine::{CrawlError, CrawlerFactory, CrawlerOptions};
use crate::domain::models::image_search::{DownloadedFile, ImageEngine, SearchRequest, UnknownEngine};
use crate::domain::models::search_output::SearchOutput;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, level_filters::LevelFilter};

/// 搜索调用中的错误
///
/// 所有变体的消息都会原样写入输出 JSON 的 `error` 字段
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    UnknownEngine(#[from] UnknownEngine),
    #[error(transparent)]
    Filesystem(#[from] io::Error),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
}

/// 图片搜索服务
///
/// 一次调用：解析引擎 → 创建临时目录 → 构造爬虫并爬取 → 列出下载文件
pub struct SearchService<F: CrawlerFactory> {
    factory: F,
    output: OutputSettings,
    log_level: LevelFilter,
}

impl<F: CrawlerFactory> SearchService<F> {
    pub fn new(factory: F, output: OutputSettings, log_level: LevelFilter) -> Self {
        Self {
            factory,
            output,
            log_level,
        }
    }

    /// 执行搜索，任何失败都转换为失败结果
    pub async fn search(&self, request: &SearchRequest) -> SearchOutput {
        match self.try_search(request).await {
            Ok(output) => output,
            Err(e) => {
                error!("Image search for {:?} on {} failed: {}", request.keyword, request.engine, e);
                SearchOutput::failure(e.to_string(), &request.engine, &request.keyword)
            }
        }
    }

    async fn try_search(&self, request: &SearchRequest) -> Result<SearchOutput, SearchError> {
        let engine: ImageEngine = request.engine.parse()?;

        let temp_dir = create_temp_dir(&self.output, engine)?;
        debug!("Created temp dir {}", temp_dir.display());

        let crawler = self
            .factory
            .create(engine, CrawlerOptions::new(&temp_dir, self.log_level))?;
        let stats = crawler.crawl(&request.keyword, request.max_num).await?;
        debug!("Crawl stats: {:?}", stats);

        let files = list_downloaded_files(&temp_dir).await?;
        info!(
            "{} search for {:?}: {} files in {}",
            engine,
            request.keyword,
            files.len(),
            temp_dir.display()
        );

        Ok(SearchOutput::success(
            engine,
            request.keyword.clone(),
            request.max_num,
            files,
            temp_dir.to_string_lossy(),
        ))
    }
}

/// 创建本次调用专用的临时目录
///
/// 目录名形如 `{prefix}_{engine}_XXXXXX`，调用结束后保留在磁盘上
pub fn create_temp_dir(output: &OutputSettings, engine: ImageEngine) -> io::Result<PathBuf> {
    let root = output.temp_root();
    std::fs::create_dir_all(&root)?;

    let dir = tempfile::Builder::new()
        .prefix(&format!("{}_{}_", output.temp_prefix, engine))
        .tempdir_in(&root)?
        .keep();

    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// 列出目录下直接包含的普通文件，按文件名升序
///
/// 子目录被跳过；符号链接按其指向的目标判断
pub async fn list_downloaded_files(dir: &Path) -> io::Result<Vec<DownloadedFile>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        if !metadata.is_file() {
            continue;
        }

        files.push(DownloadedFile {
            path: path.to_string_lossy().into_owned(),
            filename: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(files)
}
