// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_BING_BASE_URL: &str = "https://www.bing.com";
const DEFAULT_BAIDU_BASE_URL: &str = "https://image.baidu.com";
const DEFAULT_TEMP_PREFIX: &str = "imgcrawl";

/// 显式指定配置目录的环境变量
pub const CONFIG_DIR_ENV: &str = "IMGCRAWL_CONFIG_DIR";

/// 应用程序配置设置
///
/// 包含爬虫、输出目录和日志等所有配置项
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 爬虫配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 单个 HTTP 请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 并发下载数
    pub downloader_threads: usize,
    /// 单张图片下载的最大重试次数
    pub max_retries: u32,
    /// 翻页请求之间的间隔（毫秒）
    pub page_interval_ms: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// Bing 图片搜索地址
    pub bing_base_url: String,
    /// Bing 每页结果数
    pub bing_page_size: u32,
    /// 百度图片搜索地址
    pub baidu_base_url: String,
    /// 百度每页结果数
    pub baidu_page_size: u32,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 临时目录名前缀
    pub temp_prefix: String,
    /// 临时目录所在的父目录（为空时使用系统临时目录）
    pub temp_root: Option<String>,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 最低日志级别 (off, error, warn, info, debug, trace)
    pub level: String,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            downloader_threads: 4,
            max_retries: 3,
            page_interval_ms: 500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bing_base_url: DEFAULT_BING_BASE_URL.to_string(),
            bing_page_size: 35,
            baidu_base_url: DEFAULT_BAIDU_BASE_URL.to_string(),
            baidu_page_size: 30,
        }
    }
}

impl CrawlerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            temp_root: None,
        }
    }
}

impl OutputSettings {
    /// 临时目录的父目录
    pub fn temp_root(&self) -> PathBuf {
        match &self.temp_root {
            Some(root) if !root.trim().is_empty() => PathBuf::from(root),
            _ => std::env::temp_dir(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
        }
    }
}

impl LoggingSettings {
    /// 解析日志级别，无法识别时回退到 error
    pub fn level_filter(&self) -> LevelFilter {
        self.level.trim().parse().unwrap_or(LevelFilter::ERROR)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载代码内默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(config_dir().as_deref())
    }

    /// 从指定的配置目录加载
    ///
    /// `config_dir` 为 None 时只使用默认值和环境变量
    pub fn load(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let crawler = CrawlerSettings::default();
        let output = OutputSettings::default();
        let logging = LoggingSettings::default();

        let builder = Config::builder()
            // Default crawler settings
            .set_default("crawler.request_timeout_secs", crawler.request_timeout_secs)?
            .set_default("crawler.downloader_threads", crawler.downloader_threads as u64)?
            .set_default("crawler.max_retries", crawler.max_retries)?
            .set_default("crawler.page_interval_ms", crawler.page_interval_ms)?
            .set_default("crawler.user_agent", crawler.user_agent)?
            .set_default("crawler.bing_base_url", crawler.bing_base_url)?
            .set_default("crawler.bing_page_size", crawler.bing_page_size)?
            .set_default("crawler.baidu_base_url", crawler.baidu_base_url)?
            .set_default("crawler.baidu_page_size", crawler.baidu_page_size)?
            // Default output settings
            .set_default("output.temp_prefix", output.temp_prefix)?
            // Default logging settings
            .set_default("logging.level", logging.level)?;

        let builder = match config_dir {
            Some(dir) => builder
                .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
                .add_source(File::with_name(&dir.join(&env).to_string_lossy()).required(false)),
            None => builder,
        };

        builder
            .add_source(Environment::with_prefix("IMGCRAWL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// 配置文件目录
///
/// 优先使用 `IMGCRAWL_CONFIG_DIR`，否则为可执行文件旁的 `config/`。
/// 不查找当前工作目录，调用方的目录里可能放着其他程序的配置。
pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV), std::env::current_exe().ok())
}

pub fn resolve_config_dir(explicit: Option<OsString>, exe: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => exe.and_then(|exe| exe.parent().map(|bin_dir| bin_dir.join("config"))),
    }
}
