// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Helpers for callers consuming a search result directory.
//!
//! The search command leaves its temp directory on disk; these let a Rust
//! caller inline an image or drop the directory once it is done with it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io;
use std::path::Path;
use tokio::fs;

/// Remove a result directory and everything in it. A missing directory is not an error.
pub async fn cleanup_temp_dir(temp_dir: impl AsRef<Path>) -> io::Result<()> {
    match fs::remove_dir_all(temp_dir.as_ref()).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// MIME type for an image file, derived from its extension.
pub fn mime_type_for(path: impl AsRef<Path>) -> String {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    }
}

/// Read an image file as a `data:` URI.
pub async fn read_image_as_data_uri(path: impl AsRef<Path>) -> io::Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).await?;
    Ok(format!(
        "data:{};base64,{}",
        mime_type_for(path),
        STANDARD.encode(bytes)
    ))
}
