//! ローカル画像・サンプル画像の取り込み

use crate::error::{InteriorAiError, Result};
use image::ImageFormat;
use interior_ai_common::{is_image_media_type, sample_image, SelectedImage};
use log::{debug, error};
use std::path::Path;

/// ローカルファイルを読み込む
///
/// 形式はバイト列から判定し、判定できなければ拡張子で判定する。
/// どちらでも画像と判定できなければ拒否
pub fn load_file(path: &Path) -> Result<SelectedImage> {
    if !path.is_file() {
        return Err(InteriorAiError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime_type(path, &bytes)
        .ok_or_else(|| InteriorAiError::NotAnImage(path.display().to_string()))?;
    debug!("{}: {} ({} bytes)", path.display(), mime_type, bytes.len());

    let image = SelectedImage::from_bytes(&bytes, mime_type, path.display().to_string())?;
    Ok(image)
}

/// 画像のメディアタイプを判定
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| is_image_media_type(mime))
}

/// サンプル画像を取得（`number` は1始まり）
pub async fn fetch_sample(client: &reqwest::Client, number: usize) -> Result<SelectedImage> {
    let sample = number
        .checked_sub(1)
        .and_then(sample_image)
        .ok_or(InteriorAiError::SampleNotFound(number))?;

    let response = client.get(sample.url).send().await.map_err(|e| {
        error!("Error loading sample image: {}", e);
        InteriorAiError::SampleFetch(e.to_string())
    })?;

    if !response.status().is_success() {
        return Err(InteriorAiError::SampleFetch(format!(
            "{} (HTTP {})",
            sample.label,
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !is_image_media_type(&content_type) {
        return Err(InteriorAiError::NotAnImage(format!(
            "{} ({})",
            sample.label, content_type
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| InteriorAiError::SampleFetch(e.to_string()))?;

    let image = SelectedImage::from_bytes(&bytes, &content_type, sample.url)?;
    Ok(image)
}
