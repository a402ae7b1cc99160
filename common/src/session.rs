//! アプリケーション状態機械（CLI/WASM共通）
//!
//! 画像選択 → 解析 → リデザイン生成 → 表示 の流れを1つの `Session` で持ち、
//! 全ての変化は `Session::apply` を通す。
//!
//! - 主状態: Idle → Analyzing → Success / Error
//! - 副状態（Success中のみ意味を持つ）: リデザイン画像の生成状況と表示切替
//!
//! リモート呼び出しは `Command` として呼び出し側に返し、完了時に
//! 発行時の `RequestToken` 付きイベントで戻してもらう。
//! 新しい画像選択やリセットで世代が進むため、古いリクエストの結果は無視される

use log::debug;

use crate::ingest::{ImagePayload, SelectedImage};
use crate::types::AnalysisResult;

/// 解析失敗時にユーザーへ見せるメッセージ（原因はログのみ）
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze the image. Please try again.";

/// 主状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Analyzing => "analyzing",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }
}

/// リデザイン画像の生成状況
///
/// `Failed` はユーザーには見せない。表示上は画像なしと同じ扱い
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Visualization {
    #[default]
    NotStarted,
    InProgress,
    Ready(String),
    Failed,
}

/// 表示する画像
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageView {
    #[default]
    Original,
    Generated,
}

/// リクエスト世代
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 状態遷移イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ImageSelected(SelectedImage),
    AnalysisSucceeded {
        token: RequestToken,
        result: AnalysisResult,
    },
    AnalysisFailed {
        token: RequestToken,
        message: String,
    },
    VisualizationSucceeded {
        token: RequestToken,
        image_url: String,
    },
    VisualizationFailed {
        token: RequestToken,
    },
    /// 呼び出し側がリデザイン生成を行わないと決めた
    VisualizationSkipped {
        token: RequestToken,
    },
    Reset,
    ToggleView,
    ShowView(ImageView),
}

/// 呼び出し側が実行するリモート呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartAnalysis {
        token: RequestToken,
        image: ImagePayload,
    },
    StartVisualization {
        token: RequestToken,
        image: ImagePayload,
        design_style: String,
        item_names: Vec<String>,
    },
}

impl Command {
    pub fn token(&self) -> RequestToken {
        match self {
            Command::StartAnalysis { token, .. } | Command::StartVisualization { token, .. } => *token,
        }
    }
}

/// アプリケーションの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    status: UploadStatus,
    generation: u64,
    image: Option<SelectedImage>,
    analysis: Option<AnalysisResult>,
    error: Option<String>,
    visualization: Visualization,
    view: ImageView,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// イベントを適用し、必要なら次に実行するコマンドを返す
    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::ImageSelected(image) => self.select_image(image),
            Event::AnalysisSucceeded { token, result } => self.finish_analysis(token, Ok(result)),
            Event::AnalysisFailed { token, message } => self.finish_analysis(token, Err(message)),
            Event::VisualizationSucceeded { token, image_url } => {
                self.finish_visualization(token, Visualization::Ready(image_url));
                None
            }
            Event::VisualizationFailed { token } => {
                self.finish_visualization(token, Visualization::Failed);
                None
            }
            Event::VisualizationSkipped { token } => {
                self.finish_visualization(token, Visualization::NotStarted);
                None
            }
            Event::Reset => {
                let generation = self.generation + 1;
                *self = Session {
                    generation,
                    ..Session::default()
                };
                None
            }
            Event::ToggleView => {
                let target = match self.view {
                    ImageView::Original => ImageView::Generated,
                    ImageView::Generated => ImageView::Original,
                };
                self.show_view(target);
                None
            }
            Event::ShowView(view) => {
                self.show_view(view);
                None
            }
        }
    }

    fn select_image(&mut self, image: SelectedImage) -> Option<Command> {
        // 解析中の再選択は受け付けない（解析リクエストは常に1件まで）
        if self.status == UploadStatus::Analyzing {
            debug!("image selected while analyzing; ignored");
            return None;
        }

        self.generation += 1;
        let token = self.current_token();
        let payload = image.payload.clone();

        self.status = UploadStatus::Analyzing;
        self.image = Some(image);
        self.analysis = None;
        self.error = None;
        self.visualization = Visualization::NotStarted;
        self.view = ImageView::Original;

        Some(Command::StartAnalysis {
            token,
            image: payload,
        })
    }

    fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<AnalysisResult, String>,
    ) -> Option<Command> {
        if token != self.current_token() || self.status != UploadStatus::Analyzing {
            debug!(
                "stale analysis result ignored (token {}, current {}, status {})",
                token.value(),
                self.generation,
                self.status.as_str()
            );
            return None;
        }

        match outcome {
            Ok(result) => {
                self.status = UploadStatus::Success;
                let command = self.image.as_ref().map(|image| Command::StartVisualization {
                    token,
                    image: image.payload.clone(),
                    design_style: result.design_style.clone(),
                    item_names: result.item_names(),
                });
                self.visualization = if command.is_some() {
                    Visualization::InProgress
                } else {
                    Visualization::NotStarted
                };
                self.analysis = Some(result);
                command
            }
            Err(message) => {
                self.status = UploadStatus::Error;
                self.error = Some(message);
                None
            }
        }
    }

    fn finish_visualization(&mut self, token: RequestToken, outcome: Visualization) {
        if token != self.current_token()
            || self.status != UploadStatus::Success
            || self.visualization != Visualization::InProgress
        {
            debug!(
                "stale visualization result ignored (token {}, current {})",
                token.value(),
                self.generation
            );
            return;
        }

        self.view = match outcome {
            Visualization::Ready(_) => ImageView::Generated,
            _ => ImageView::Original,
        };
        self.visualization = outcome;
    }

    fn show_view(&mut self, view: ImageView) {
        if self.status != UploadStatus::Success {
            return;
        }
        if view == ImageView::Generated && self.generated_image().is_none() {
            debug!("no generated image yet; view stays original");
            return;
        }
        self.view = view;
    }

    // =============================================
    // 参照
    // =============================================

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn current_token(&self) -> RequestToken {
        RequestToken(self.generation)
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.preview_url.as_str())
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visualization(&self) -> &Visualization {
        &self.visualization
    }

    pub fn view(&self) -> ImageView {
        self.view
    }

    pub fn generated_image(&self) -> Option<&str> {
        match &self.visualization {
            Visualization::Ready(url) => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn is_visualizing(&self) -> bool {
        self.status == UploadStatus::Success && self.visualization == Visualization::InProgress
    }

    /// 「AI Redesign」表示に切り替え可能か
    pub fn can_show_generated(&self) -> bool {
        self.status == UploadStatus::Success && self.generated_image().is_some()
    }

    /// 現在表示すべき画像のURL
    pub fn displayed_image_url(&self) -> Option<&str> {
        match self.view {
            ImageView::Generated => self.generated_image().or_else(|| self.preview_url()),
            ImageView::Original => self.preview_url(),
        }
    }
}
