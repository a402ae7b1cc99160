use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteriorAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`interior-ai config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("サンプル画像がありません: {0}（1〜3を指定）")]
    SampleNotFound(usize),

    #[error("サンプル画像を取得できませんでした: {0}")]
    SampleFetch(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    /// 解析失敗（メッセージは利用者向けの固定文言）
    #[error("{0}")]
    AnalysisFailed(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] interior_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, InteriorAiError>;
