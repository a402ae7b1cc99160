//! Interior AI Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態機械・Gemini連携ロジック

pub mod types;
pub mod error;
pub mod ingest;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod session;
pub mod advisor;
pub mod client;

pub use types::{AnalysisResult, ShoppingItem};
pub use error::{Error, Result};
pub use ingest::{
    ImagePayload, SampleGate, SampleImage, SelectedImage, SAMPLE_IMAGES,
    is_image_media_type, sample_image, strip_data_url_prefix,
};
pub use gemini::{GeminiSettings, describe_api_error};
pub use parser::{extract_json, parse_analysis_text, parse_analysis_response, extract_generated_image};
pub use session::{
    Command, Event, ImageView, RequestToken, Session, UploadStatus, Visualization,
    ANALYSIS_FAILED_MESSAGE,
};
pub use advisor::{DesignAdvisor, RunObserver, execute, run_to_completion};
pub use client::{GeminiClient, Transport};
