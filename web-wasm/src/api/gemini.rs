//! Gemini API連携（ブラウザ fetch）
//!
//! リクエスト組み立てとレスポンス解析は `interior_ai_common::GeminiClient` が行い、
//! ここでは送信手段と画像の読み込みだけを持つ

use interior_ai_common::{
    describe_api_error, sample_image, Error, GeminiClient, GeminiSettings, Result,
    SelectedImage,
};
use js_sys::Uint8Array;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, Request, RequestInit, RequestMode, Response, Url};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// fetch API による送信
pub struct FetchTransport;

impl interior_ai_common::Transport for FetchTransport {
    async fn post_json(&self, url: &str, api_key: &str, body: String) -> Result<String> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let headers = request.headers();
        headers.set("Content-Type", "application/json").map_err(js_error)?;
        headers.set(API_KEY_HEADER, api_key).map_err(js_error)?;

        let resp = fetch(&request).await?;
        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(Error::Api(describe_api_error(resp.status(), &text)));
        }
        Ok(text)
    }
}

pub fn gemini_client(api_key: String) -> GeminiClient<FetchTransport> {
    GeminiClient::new(GeminiSettings::new(api_key), FetchTransport)
}

/// 選択されたファイルを取り込む（プレビューはObject URL）
pub async fn read_file(file: File) -> Result<SelectedImage> {
    let mime_type = file.type_();
    let bytes = blob_bytes(&file).await?;
    let preview_url = Url::create_object_url_with_blob(&file).map_err(js_error)?;
    debug!("file loaded: {} ({}, {} bytes)", file.name(), mime_type, bytes.len());
    SelectedImage::from_bytes(&bytes, &mime_type, preview_url)
}

/// サンプル画像を取得して取り込む（プレビューは元URL）
pub async fn fetch_sample(index: usize) -> Result<SelectedImage> {
    let sample = sample_image(index)
        .ok_or_else(|| Error::Api(format!("unknown sample index {}", index)))?;

    let request = Request::new_with_str(sample.url).map_err(js_error)?;
    let resp = fetch(&request).await?;
    if !resp.ok() {
        return Err(Error::Api(format!("HTTP {}", resp.status())));
    }

    let blob: Blob = JsFuture::from(resp.blob().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let bytes = blob_bytes(&blob).await?;
    debug!("sample loaded: {} ({} bytes)", sample.label, bytes.len());
    SelectedImage::from_bytes(&bytes, &blob.type_(), sample.url)
}

/// 表示しなくなったプレビューのObject URLを解放
pub fn release_preview(previous: Option<&str>, current: Option<&str>) {
    if let Some(url) = stale_object_url(previous, current) {
        debug!("revoke preview {}", url);
        if let Err(e) = Url::revoke_object_url(url) {
            debug!("revoke failed: {:?}", e);
        }
    }
}

/// 差し替わった `blob:` URLだけを返す（サンプルURLは対象外）
fn stale_object_url<'a>(previous: Option<&'a str>, current: Option<&str>) -> Option<&'a str> {
    previous.filter(|url| url.starts_with("blob:") && current != Some(*url))
}

async fn fetch(request: &Request) -> Result<Response> {
    let window = web_sys::window().ok_or_else(|| Error::Api("window not available".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    value.dyn_into::<Response>().map_err(js_error)
}

async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>> {
    let buffer = JsFuture::from(blob.array_buffer()).await.map_err(js_error)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn js_error(value: JsValue) -> Error {
    Error::Api(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
