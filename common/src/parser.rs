//! APIレスポンスパーサー
//!
//! Gemini APIレスポンスからJSONを抽出して解析結果にし、
//! 画像生成レスポンスから最初の画像パートを取り出す

use crate::error::{Error, Result};
use crate::gemini::GeminiResponse;
use crate::types::AnalysisResult;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use interior_ai_common::extract_json;
///
/// let response = "{\"designStyle\": \"Boho\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("designStyle"));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON not found".into()))
}

/// 解析テキストをパース
///
/// スキーマ必須項目が欠けていればエラー
pub fn parse_analysis_text(text: &str) -> Result<AnalysisResult> {
    if text.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    let json_str = extract_json(text)?;
    serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("analysis JSON parse error: {}", e)))
}

/// 解析レスポンスをパース
pub fn parse_analysis_response(response: &GeminiResponse) -> Result<AnalysisResult> {
    let text = response.text().ok_or(Error::EmptyResponse)?;
    parse_analysis_text(&text)
}

/// 画像生成レスポンスから最初の画像パートをData URLで返す
pub fn extract_generated_image(response: &GeminiResponse) -> Result<String> {
    response
        .parts()
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|data| !data.data.is_empty())
        .map(|data| {
            let mime_type = if data.mime_type.is_empty() {
                "image/png"
            } else {
                data.mime_type.as_str()
            };
            format!("data:{};base64,{}", mime_type, data.data)
        })
        .ok_or(Error::NoImageGenerated)
}
