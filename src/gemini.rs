//! Gemini API 送信（reqwest）

use crate::config::Config;
use crate::error::{InteriorAiError, Result};
use interior_ai_common::{describe_api_error, Error, GeminiClient, GeminiSettings, Transport};
use std::time::Duration;

/// reqwest による JSON POST
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> interior_ai_common::Result<String> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Api(describe_api_error(status.as_u16(), &text)));
        }
        Ok(text)
    }
}

/// タイムアウト付きHTTPクライアント
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| InteriorAiError::ApiCall(e.to_string()))
}

pub fn gemini_client(settings: GeminiSettings, http: reqwest::Client) -> GeminiClient<ReqwestTransport> {
    GeminiClient::new(settings, ReqwestTransport::new(http))
}
