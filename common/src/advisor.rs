//! リモート呼び出しの実行
//!
//! `Session` が返した `Command` を `DesignAdvisor` で実行し、完了イベントに変換する。
//! 解析の失敗は原因をログに残したうえで固定メッセージに置き換え、
//! リデザインの失敗はログのみで吸収する

use log::{error, info, warn};

use crate::error::Result;
use crate::ingest::ImagePayload;
use crate::session::{Command, Event, Session, ANALYSIS_FAILED_MESSAGE};
use crate::types::AnalysisResult;

/// スタイル解析とリデザイン生成を行うサービス
#[allow(async_fn_in_trait)]
pub trait DesignAdvisor {
    /// 部屋の写真を解析してスタイルとおすすめアイテムを返す
    async fn analyze(&self, image: &ImagePayload) -> Result<AnalysisResult>;

    /// アイテムを追加したリデザイン画像をData URLで返す
    async fn visualize(
        &self,
        image: &ImagePayload,
        design_style: &str,
        item_names: &[String],
    ) -> Result<String>;
}

/// コマンドを実行して完了イベントを返す
pub async fn execute<A: DesignAdvisor>(advisor: &A, command: Command) -> Event {
    match command {
        Command::StartAnalysis { token, image } => match advisor.analyze(&image).await {
            Ok(result) => {
                info!(
                    "analysis done: {} ({} items)",
                    result.design_style,
                    result.shopping_list.len()
                );
                Event::AnalysisSucceeded { token, result }
            }
            Err(e) => {
                error!("Error analyzing image: {}", e);
                Event::AnalysisFailed {
                    token,
                    message: ANALYSIS_FAILED_MESSAGE.to_string(),
                }
            }
        },
        Command::StartVisualization {
            token,
            image,
            design_style,
            item_names,
        } => match advisor.visualize(&image, &design_style, &item_names).await {
            Ok(image_url) => {
                info!("redesign image generated ({} bytes)", image_url.len());
                Event::VisualizationSucceeded { token, image_url }
            }
            Err(e) => {
                warn!("Visualization failed: {}", e);
                Event::VisualizationFailed { token }
            }
        },
    }
}

/// `run_to_completion` の進行通知
///
/// 既定では何もせず全コマンドを実行する
pub trait RunObserver {
    /// コマンド実行前。false を返すとリデザイン生成を省略する（解析は省略できない）
    fn on_command(&mut self, _command: &Command) -> bool {
        true
    }

    /// コマンド完了後、イベント適用前
    fn on_event(&mut self, _event: &Event) {}
}

impl RunObserver for () {}

/// イベントを適用し、発生したコマンドがなくなるまで順に実行する
///
/// CLIのように1件ずつ最後まで待つ呼び出し側向け
pub async fn run_to_completion<A, O>(advisor: &A, session: &mut Session, event: Event, observer: &mut O)
where
    A: DesignAdvisor,
    O: RunObserver,
{
    let mut next = session.apply(event);
    while let Some(command) = next {
        let run = observer.on_command(&command);
        if let (false, Command::StartVisualization { token, .. }) = (run, &command) {
            info!("redesign skipped");
            next = session.apply(Event::VisualizationSkipped { token: *token });
            continue;
        }

        let event = execute(advisor, command).await;
        observer.on_event(&event);
        next = session.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ingest::SelectedImage;
    use crate::session::{ImageView, UploadStatus, Visualization};
    use crate::types::ShoppingItem;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// テスト用の固定応答サービス
    struct FakeAdvisor {
        analysis: std::result::Result<AnalysisResult, String>,
        redesign: std::result::Result<String, String>,
        visualize_calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeAdvisor {
        fn new(
            analysis: std::result::Result<AnalysisResult, String>,
            redesign: std::result::Result<String, String>,
        ) -> Self {
            Self {
                analysis,
                redesign,
                visualize_calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl DesignAdvisor for FakeAdvisor {
        async fn analyze(&self, _image: &ImagePayload) -> Result<AnalysisResult> {
            self.analysis.clone().map_err(Error::Api)
        }

        async fn visualize(
            &self,
            _image: &ImagePayload,
            design_style: &str,
            item_names: &[String],
        ) -> Result<String> {
            self.visualize_calls
                .borrow_mut()
                .push((design_style.to_string(), item_names.to_vec()));
            self.redesign.clone().map_err(|_| Error::NoImageGenerated)
        }
    }

    fn scandinavian() -> AnalysisResult {
        AnalysisResult {
            design_style: "Scandinavian".to_string(),
            description: "...".to_string(),
            shopping_list: vec![ShoppingItem {
                item_name: "Oak Coffee Table".to_string(),
                category: "Furniture".to_string(),
                recommendation: "Light Oak Wood".to_string(),
                estimated_price: "$150 - $300".to_string(),
            }],
        }
    }

    fn dropped_jpeg() -> Event {
        let image = SelectedImage::from_bytes(b"\xFF\xD8\xFF", "image/jpeg", "blob:room").unwrap();
        Event::ImageSelected(image)
    }

    #[test]
    fn test_end_to_end_scandinavian_scenario() {
        let advisor = FakeAdvisor::new(
            Ok(scandinavian()),
            Ok("data:image/png;base64,REDESIGN".to_string()),
        );
        let mut session = Session::new();

        block_on(run_to_completion(&advisor, &mut session, dropped_jpeg(), &mut ()));

        assert_eq!(session.status(), UploadStatus::Success);
        assert_eq!(session.analysis(), Some(&scandinavian()));
        assert_eq!(
            advisor.visualize_calls.borrow().as_slice(),
            &[("Scandinavian".to_string(), vec!["Oak Coffee Table".to_string()])]
        );
        assert_eq!(session.generated_image(), Some("data:image/png;base64,REDESIGN"));
        assert_eq!(session.view(), ImageView::Generated);
    }

    #[test]
    fn test_analysis_error_is_normalized() {
        let advisor = FakeAdvisor::new(
            Err("HTTP 500 INTERNAL: backend exploded".to_string()),
            Ok("unused".to_string()),
        );
        let mut session = Session::new();

        block_on(run_to_completion(&advisor, &mut session, dropped_jpeg(), &mut ()));

        assert_eq!(session.status(), UploadStatus::Error);
        assert_eq!(session.error_message(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(advisor.visualize_calls.borrow().is_empty());
    }

    #[test]
    fn test_visualization_error_keeps_success() {
        let advisor = FakeAdvisor::new(Ok(scandinavian()), Err("no image".to_string()));
        let mut session = Session::new();

        block_on(run_to_completion(&advisor, &mut session, dropped_jpeg(), &mut ()));

        assert_eq!(session.status(), UploadStatus::Success);
        assert!(session.error_message().is_none());
        assert_eq!(session.visualization(), &Visualization::Failed);
        assert!(!session.can_show_generated());
        assert_eq!(session.view(), ImageView::Original);
    }

    /// リデザインだけ断る観測者
    #[derive(Default)]
    struct AnalysisOnly {
        commands: Vec<&'static str>,
        events: usize,
    }

    impl RunObserver for AnalysisOnly {
        fn on_command(&mut self, command: &Command) -> bool {
            match command {
                Command::StartAnalysis { .. } => {
                    self.commands.push("analysis");
                    true
                }
                Command::StartVisualization { .. } => {
                    self.commands.push("visualization");
                    false
                }
            }
        }

        fn on_event(&mut self, _event: &Event) {
            self.events += 1;
        }
    }

    #[test]
    fn test_observer_can_skip_visualization() {
        let advisor = FakeAdvisor::new(Ok(scandinavian()), Ok("data:,".to_string()));
        let mut session = Session::new();
        let mut observer = AnalysisOnly::default();

        block_on(run_to_completion(&advisor, &mut session, dropped_jpeg(), &mut observer));

        assert_eq!(observer.commands, vec!["analysis", "visualization"]);
        assert_eq!(observer.events, 1);
        assert!(advisor.visualize_calls.borrow().is_empty());
        assert_eq!(session.status(), UploadStatus::Success);
        assert_eq!(session.visualization(), &Visualization::NotStarted);
        assert!(!session.is_visualizing());
    }

    #[test]
    fn test_execute_carries_token() {
        let advisor = FakeAdvisor::new(Ok(scandinavian()), Ok("data:,".to_string()));
        let mut session = Session::new();
        let command = session.apply(dropped_jpeg()).unwrap();
        let token = command.token();

        match block_on(execute(&advisor, command)) {
            Event::AnalysisSucceeded { token: t, .. } => assert_eq!(t, token),
            other => panic!("Expected AnalysisSucceeded, got {:?}", other),
        }
    }
}
