//! Gemini APIクライアント（送信手段はターゲットごとに差し替え）

use log::debug;

use crate::advisor::DesignAdvisor;
use crate::error::Result;
use crate::gemini::{
    build_analysis_request, build_visualization_request, GeminiRequest, GeminiResponse,
    GeminiSettings,
};
use crate::ingest::ImagePayload;
use crate::parser::{extract_generated_image, parse_analysis_response};
use crate::types::AnalysisResult;

/// JSON POST の送信手段
///
/// 2xx 以外は `Error::Api` を返すこと
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, api_key: &str, body: String) -> Result<String>;
}

/// Gemini APIクライアント
pub struct GeminiClient<T> {
    settings: GeminiSettings,
    transport: T,
}

impl<T: Transport> GeminiClient<T> {
    pub fn new(settings: GeminiSettings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// generateContent 呼び出し（共通処理）
    pub async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let url = self.settings.endpoint(model);
        let body = serde_json::to_string(request)?;
        debug!("POST {} ({} bytes)", url, body.len());

        let text = self
            .transport
            .post_json(&url, &self.settings.api_key, body)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// スタイル解析
    pub async fn analyze_interior_image(&self, image: &ImagePayload) -> Result<AnalysisResult> {
        let request = build_analysis_request(image);
        let response = self.generate(&self.settings.analysis_model, &request).await?;
        parse_analysis_response(&response)
    }

    /// リデザイン画像生成
    pub async fn generate_redesign(
        &self,
        image: &ImagePayload,
        design_style: &str,
        item_names: &[String],
    ) -> Result<String> {
        let request = build_visualization_request(image, design_style, item_names);
        let response = self.generate(&self.settings.image_model, &request).await?;
        extract_generated_image(&response)
    }
}

impl<T: Transport> DesignAdvisor for GeminiClient<T> {
    async fn analyze(&self, image: &ImagePayload) -> Result<AnalysisResult> {
        self.analyze_interior_image(image).await
    }

    async fn visualize(
        &self,
        image: &ImagePayload,
        design_style: &str,
        item_names: &[String],
    ) -> Result<String> {
        self.generate_redesign(image, design_style, item_names).await
    }
}
