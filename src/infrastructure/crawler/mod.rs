// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 图片爬虫
//!
//! 通用的分页爬虫（paged）驱动各搜索引擎的图片来源（source），
//! 由下载器（downloader）并发下载并写入存储。

pub mod baidu;
pub mod bing;
pub mod downloader;
pub mod factory;
pub mod http;
pub mod image_format;
pub mod paged;
pub mod source;

pub use factory::DefaultCrawlerFactory;
pub use paged::PagedCrawler;
pub use source::ImageSource;
