//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not an image: {0}")]
    InvalidMediaType(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("No response text received from Gemini")]
    EmptyResponse,

    #[error("No image generated")]
    NoImageGenerated,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
