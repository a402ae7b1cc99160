//! Gemini API のリクエスト/レスポンス型（CLI/WASM共通）
//!
//! HTTP送信部分は各ターゲット側（CLI: reqwest, WASM: fetch）が持つ。
//! ここではJSONの形とリクエスト組み立てだけを扱う

use serde::{Deserialize, Serialize};

use crate::ingest::{strip_data_url_prefix, ImagePayload};
use crate::prompts::{analysis_response_schema, build_analysis_prompt, build_visualization_prompt};

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// スタイル解析用モデル
pub const ANALYSIS_MODEL: &str = "gemini-2.5-flash";

/// 画像生成（編集）用モデル
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub api_key: String,
    pub analysis_model: String,
    pub image_model: String,
    pub base_url: String,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            analysis_model: ANALYSIS_MODEL.to_string(),
            image_model: IMAGE_MODEL.to_string(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    /// generateContent エンドポイントURL
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Data URLプレフィックスが残っていても送信前に除去する
    pub fn image(payload: &ImagePayload) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: payload.mime_type.clone(),
                data: strip_data_url_prefix(&payload.data).to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

/// Gemini APIレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

impl GeminiResponse {
    /// 先頭候補のパート一覧
    pub fn parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// 先頭候補のテキストパートを連結したもの（空ならNone）
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// エラーレスポンス本体 `{"error": {"code": 400, "message": "...", "status": "..."}}`
#[derive(Debug, Clone, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// HTTPエラーをログ用の文字列にまとめる
pub fn describe_api_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) if !parsed.error.status.is_empty() => {
            format!("HTTP {} {}: {}", status, parsed.error.status, parsed.error.message)
        }
        Ok(parsed) => format!("HTTP {}: {}", status, parsed.error.message),
        Err(_) => format!("HTTP {}", status),
    }
}

/// スタイル解析リクエスト
///
/// 画像 + 指示文、レスポンスは responseSchema で制約したJSON
pub fn build_analysis_request(image: &ImagePayload) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part::image(image), Part::text(build_analysis_prompt())],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_response_schema()),
            ..Default::default()
        }),
    }
}

/// リデザイン画像生成リクエスト
pub fn build_visualization_request(
    image: &ImagePayload,
    design_style: &str,
    item_names: &[String],
) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::image(image),
                Part::text(build_visualization_prompt(design_style, item_names)),
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
            ..Default::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ImagePayload {
        ImagePayload::new("data:image/jpeg;base64,/9j/4AAQ", None)
    }

    #[test]
    fn test_endpoint() {
        let settings = GeminiSettings::new("key");
        assert_eq!(
            settings.endpoint(ANALYSIS_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );

        let custom = GeminiSettings {
            base_url: "http://localhost:8080/v1beta/".to_string(),
            ..GeminiSettings::new("key")
        };
        assert_eq!(
            custom.endpoint("m"),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_part_text_serialize() {
        let json = serde_json::to_string(&Part::text("Hello")).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_part_inline_data_serialize() {
        let json = serde_json::to_string(&Part::image(&payload())).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"inlineData":{"mimeType":"image/jpeg","data":"/9j/4AAQ"}}"#);
    }

    #[test]
    fn test_analysis_request_serialize() {
        let request = build_analysis_request(&payload());
        let value = serde_json::to_value(&request).expect("シリアライズ失敗");

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["data"], "/9j/4AAQ");
        assert!(parts[1]["text"].as_str().unwrap().contains("Design Style"));

        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["required"][2], "shoppingList");
        assert!(config.get("responseModalities").is_none());
        assert!(config.get("temperature").is_none());
    }

    #[test]
    fn test_visualization_request_serialize() {
        let items = vec!["Oak Coffee Table".to_string(), "Linen Sofa".to_string()];
        let request = build_visualization_request(&payload(), "Scandinavian", &items);
        let value = serde_json::to_value(&request).expect("シリアライズ失敗");

        let prompt = value["contents"][0]["parts"][1]["text"].as_str().unwrap();
        assert!(prompt.contains("Scandinavian"));
        assert!(prompt.contains("Oak Coffee Table, Linen Sofa"));
        assert_eq!(value["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_gemini_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"designStyle\":"}, {"text": "\"Boho\"}"}]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.text().as_deref(), Some("{\"designStyle\":\"Boho\"}"));
    }

    #[test]
    fn test_gemini_response_without_candidates() {
        let response: GeminiResponse = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert!(response.parts().is_empty());
        assert!(response.text().is_none());
    }

    #[test]
    fn test_gemini_response_inline_data_aliases() {
        let json = r#"{"candidates": [{"content": {"parts": [
            {"inline_data": {"mimeType": "image/png", "data": "AAA"}},
            {"inlineData": {"mimeType": "image/png", "data": "BBB"}}
        ]}}]}"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        let parts = response.parts();
        assert_eq!(parts[0].inline_data.as_ref().unwrap().data, "AAA");
        assert_eq!(parts[1].inline_data.as_ref().unwrap().data, "BBB");
    }

    #[test]
    fn test_describe_api_error() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            describe_api_error(403, body),
            "HTTP 403 PERMISSION_DENIED: API key not valid"
        );
        assert_eq!(describe_api_error(502, "<html>bad gateway</html>"), "HTTP 502");
    }
}
