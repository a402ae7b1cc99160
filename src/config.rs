use crate::error::{InteriorAiError, Result};
use interior_ai_common::gemini::{ANALYSIS_MODEL, GEMINI_API_BASE_URL, IMAGE_MODEL};
use interior_ai_common::GeminiSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを読む環境変数（先頭が優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub analysis_model: String,
    pub image_model: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            analysis_model: ANALYSIS_MODEL.into(),
            image_model: IMAGE_MODEL.into(),
            api_base_url: GEMINI_API_BASE_URL.into(),
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルがなければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InteriorAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("interior-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// 環境変数を優先し、なければ設定ファイルの値
    pub fn api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(InteriorAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// Gemini接続設定（APIキー必須）
    pub fn gemini_settings(&self) -> Result<GeminiSettings> {
        Ok(self.gemini_settings_with_key(self.get_api_key()?))
    }

    pub fn gemini_settings_with_key(&self, api_key: String) -> GeminiSettings {
        GeminiSettings {
            api_key,
            analysis_model: self.analysis_model.clone(),
            image_model: self.image_model.clone(),
            base_url: self.api_base_url.clone(),
        }
    }
}
