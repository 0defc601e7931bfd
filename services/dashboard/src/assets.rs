//! Background images embedded into rendered pages.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crop_common::{CropError, CropResult};

use crate::config::AssetsConfig;
use crate::session::Screen;

/// Page and sidebar backgrounds for one screen, as data URIs.
#[derive(Debug, Clone)]
pub struct Backgrounds {
    pub page: String,
    pub sidebar: String,
}

impl Backgrounds {
    /// Read the two background images of `screen`.
    pub async fn load(config: &AssetsConfig, screen: Screen) -> CropResult<Self> {
        let (page, sidebar) = config.backgrounds(screen);
        Ok(Self {
            page: data_uri(&page).await?,
            sidebar: data_uri(&sidebar).await?,
        })
    }
}

/// Read a file and encode it as a `data:` URI.
pub async fn data_uri(path: &Path) -> CropResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CropError::AssetUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(encode_data_uri(content_type_for(path), &bytes))
}

pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// MIME type from a file extension. Unknown extensions are served as JPEG.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

/// Whether `path` is a regular file this process can open.
pub fn is_readable(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

/// Paths among `config` that cannot be read.
pub fn missing(config: &AssetsConfig) -> Vec<String> {
    config
        .all()
        .into_iter()
        .filter(|p| !is_readable(p))
        .map(|p| p.display().to_string())
        .collect()
}
