//! 画像取り込み（CLI/WASM共通）
//!
//! - Data URLの分解・組み立て
//! - メディアタイプ検証（image/* 以外は拒否）
//! - サンプル画像の定義と、同時に1件だけ読み込むためのゲート

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// メディアタイプ未指定時のデフォルト
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 送信用の画像データ（Data URLプレフィックスなしのBase64）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Base64文字列から作成
    ///
    /// `data` にData URLプレフィックスが付いていれば取り除く。
    /// `mime_type` が None の場合は image/jpeg とみなす
    pub fn new(data: &str, mime_type: Option<&str>) -> Self {
        Self {
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            data: strip_data_url_prefix(data).to_string(),
        }
    }

    /// バイト列から作成（メディアタイプを検証）
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self> {
        ensure_image_media_type(mime_type)?;
        Ok(Self {
            mime_type: essence(mime_type),
            data: STANDARD.encode(bytes),
        })
    }

    /// "data:image/png;base64,..." 形式から作成
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let data = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::InvalidDataUrl(preview(data_url)))?;
        let mime_type = extract_mime_type_from_data_url(data_url);
        ensure_image_media_type(mime_type)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Base64をデコード
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::InvalidDataUrl(e.to_string()))
    }

    /// 保存時の拡張子
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "jpg",
        }
    }
}

/// 取り込み完了イベントの中身
///
/// 送信用ペイロードとプレビュー参照（Object URL, サンプルURL, ファイルパス）は
/// 別物でよいが、同じ画像を指す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub payload: ImagePayload,
    pub preview_url: String,
}

impl SelectedImage {
    pub fn new(payload: ImagePayload, preview_url: impl Into<String>) -> Self {
        Self {
            payload,
            preview_url: preview_url.into(),
        }
    }

    /// 読み込んだバイト列から作成
    pub fn from_bytes(bytes: &[u8], mime_type: &str, preview_url: impl Into<String>) -> Result<Self> {
        let payload = ImagePayload::from_bytes(bytes, mime_type)?;
        Ok(Self::new(payload, preview_url))
    }
}

/// image/* 判定（パラメータ・大文字小文字は無視）
pub fn is_image_media_type(mime_type: &str) -> bool {
    essence(mime_type).starts_with("image/")
}

pub fn ensure_image_media_type(mime_type: &str) -> Result<()> {
    if is_image_media_type(mime_type) {
        Ok(())
    } else {
        Err(Error::InvalidMediaType(mime_type.to_string()))
    }
}

/// Data URLプレフィックスを除去（プレフィックスがなければそのまま返す）
pub fn strip_data_url_prefix(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some(pos) = data.find(";base64,") {
            return &data[pos + ";base64,".len()..];
        }
    }
    data
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    if !data_url.starts_with("data:") {
        return None;
    }
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(|c: char| c == ';' || c == ',').next())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn preview(s: &str) -> String {
    s.chars().take(32).collect()
}

// =============================================
// サンプル画像
// =============================================

/// サンプル画像
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleImage {
    pub label: &'static str,
    pub url: &'static str,
}

pub const SAMPLE_IMAGES: [SampleImage; 3] = [
    SampleImage {
        label: "Bohemian Living",
        url: "https://images.unsplash.com/photo-1598928506311-c55ded91a20c?q=80&w=600&auto=format&fit=crop",
    },
    SampleImage {
        label: "Modern Industrial",
        url: "https://images.unsplash.com/photo-1616486338812-3dadae4b4ace?q=80&w=600&auto=format&fit=crop",
    },
    SampleImage {
        label: "Scandi Kitchen",
        url: "https://images.unsplash.com/photo-1556228453-efd6c1ff04f6?q=80&w=600&auto=format&fit=crop",
    },
];

pub fn sample_image(index: usize) -> Option<&'static SampleImage> {
    SAMPLE_IMAGES.get(index)
}

/// サンプル読み込みスロット
///
/// 全サンプルボタンで1つのスロットを共有し、同時に1件だけ読み込む
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleGate {
    loading: Option<usize>,
}

impl SampleGate {
    /// 読み込み開始。既に別の読み込み中なら false
    pub fn try_begin(&mut self, index: usize) -> bool {
        if self.loading.is_some() || index >= SAMPLE_IMAGES.len() {
            return false;
        }
        self.loading = Some(index);
        true
    }

    pub fn finish(&mut self) {
        self.loading = None;
    }

    pub fn loading_index(&self) -> Option<usize> {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.loading.is_some()
    }
}
