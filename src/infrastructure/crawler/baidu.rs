// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::crawler::engine::CrawlError;
use crate::infrastructure::crawler::source::ImageSource;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use serde::Deserialize;

/// 百度 objURL 中被替换掉的标点片段
const BAIDU_STR_TABLE: &[(&str, &str)] = &[("_z2C$q", ":"), ("_z&e3B", "."), ("AzdH3F", "/")];

/// 百度 objURL 的逐字符替换表（密文 -> 明文）
const BAIDU_CHAR_TABLE: &[(char, char)] = &[
    ('w', 'a'), ('k', 'b'), ('v', 'c'), ('1', 'd'), ('j', 'e'), ('u', 'f'),
    ('2', 'g'), ('i', 'h'), ('t', 'i'), ('3', 'j'), ('h', 'k'), ('s', 'l'),
    ('4', 'm'), ('g', 'n'), ('5', 'o'), ('r', 'p'), ('q', 'q'), ('6', 'r'),
    ('f', 's'), ('p', 't'), ('7', 'u'), ('e', 'v'), ('o', 'w'), ('8', '1'),
    ('d', '2'), ('n', '3'), ('9', '4'), ('c', '5'), ('m', '6'), ('0', '7'),
    ('b', '8'), ('l', '9'), ('a', '0'),
];

#[derive(Debug, Deserialize)]
struct BaiduImageResponse {
    #[serde(rename = "antiFlag")]
    anti_flag: Option<i64>,
    data: Option<Vec<BaiduImageEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BaiduImageEntry {
    #[serde(rename = "objURL")]
    obj_url: Option<String>,
    #[serde(rename = "replaceUrl")]
    replace_url: Option<Vec<BaiduReplaceUrl>>,
    #[serde(rename = "middleURL")]
    middle_url: Option<String>,
    #[serde(rename = "thumbURL")]
    thumb_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BaiduReplaceUrl {
    #[serde(rename = "ObjURL")]
    obj_url: Option<String>,
}

impl BaiduImageEntry {
    /// 原图地址优先，缩略图兜底
    fn image_url(&self) -> Option<String> {
        let replace = self
            .replace_url
            .as_ref()
            .and_then(|urls| urls.first())
            .and_then(|u| u.obj_url.clone());

        self.obj_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(decode_obj_url)
            .or_else(|| replace.filter(|u| !u.trim().is_empty()))
            .or_else(|| self.middle_url.clone().filter(|u| !u.trim().is_empty()))
            .or_else(|| self.thumb_url.clone().filter(|u| !u.trim().is_empty()))
    }
}

/// 解码百度图片搜索返回的 objURL
///
/// 已经是明文 http(s) 地址时原样返回。
pub fn decode_obj_url(encoded: &str) -> String {
    let encoded = encoded.trim();
    if encoded.starts_with("http://") || encoded.starts_with("https://") {
        return encoded.to_string();
    }

    let replaced = BAIDU_STR_TABLE
        .iter()
        .fold(encoded.to_string(), |url, (from, to)| url.replace(from, to));

    replaced
        .chars()
        .map(|c| {
            BAIDU_CHAR_TABLE
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// 百度图片搜索
///
/// 使用 `acjson` 接口，`pn` 为结果偏移量，`rn` 为每页数量
pub struct BaiduImageSource {
    base_url: String,
    page_size: u32,
}

impl BaiduImageSource {
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: page_size.max(1),
        }
    }

    /// 构建百度图片搜索 URL
    pub fn build_baidu_url(&self, query: &str, offset: u32) -> String {
        let params = [
            ("tn", "resultjson_com".to_string()),
            ("ipn", "rj".to_string()),
            ("word", query.to_string()),
            ("pn", offset.to_string()),
            ("rn", self.page_size.to_string()),
        ];

        format!(
            "{}/search/acjson?{}",
            self.base_url.trim_end_matches('/'),
            serde_urlencoded::to_string(&params).unwrap_or_default()
        )
    }

    fn is_captcha_page(&self, content: &str) -> bool {
        content.contains("wappass.baidu.com")
            || content.contains("百度安全验证")
            || content.contains("请输入验证码")
            || content.contains("/static/antispam")
    }
}

impl ImageSource for BaiduImageSource {
    fn name(&self) -> &'static str {
        "baidu"
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn page_url(&self, keyword: &str, offset: u32) -> String {
        self.build_baidu_url(keyword, offset)
    }

    fn page_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://image.baidu.com/"));
        headers
    }

    fn parse_page(&self, body: &str) -> Result<Vec<String>, CrawlError> {
        if self.is_captcha_page(body) {
            return Err(CrawlError::Blocked("baidu"));
        }

        // acjson 会输出 JSON 不允许的 \' 转义
        let body = body.replace("\\'", "'");
        let response: BaiduImageResponse = serde_json::from_str(&body)
            .map_err(|e| CrawlError::ParseError(format!("Baidu JSON parsing error: {}", e)))?;

        if response.anti_flag == Some(1) {
            return Err(CrawlError::Blocked("baidu"));
        }

        Ok(response
            .data
            .unwrap_or_default()
            .iter()
            .filter_map(BaiduImageEntry::image_url)
            .collect())
    }
}
