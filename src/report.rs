//! 解析結果の表示と保存

use crate::error::Result;
use interior_ai_common::{AnalysisResult, ImagePayload, Session};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const ANALYSIS_FILE_NAME: &str = "analysis.json";
pub const REDESIGN_FILE_STEM: &str = "redesign";

/// 保存したファイル
#[derive(Debug, Default)]
pub struct SavedFiles {
    pub analysis: Option<PathBuf>,
    pub redesign: Option<PathBuf>,
}

/// ターミナル表示用の文字列
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎨 スタイル: {}", result.design_style);
    let _ = writeln!(out, "   {}", result.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "🛒 おすすめアイテム ({}件)", result.shopping_list.len());

    for (i, item) in result.shopping_list.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} [{}] - {} / {}",
            i + 1,
            item.item_name,
            item.category,
            item.recommendation,
            item.estimated_price
        );
    }
    out
}

/// 解析結果JSONとリデザイン画像を保存
pub fn save_outputs(session: &Session, output_dir: &Path) -> Result<SavedFiles> {
    let mut saved = SavedFiles::default();
    let Some(analysis) = session.analysis() else {
        return Ok(saved);
    };

    std::fs::create_dir_all(output_dir)?;

    let analysis_path = output_dir.join(ANALYSIS_FILE_NAME);
    std::fs::write(&analysis_path, serde_json::to_string_pretty(analysis)?)?;
    saved.analysis = Some(analysis_path);

    if let Some(data_url) = session.generated_image() {
        let payload = ImagePayload::from_data_url(data_url)?;
        let path = output_dir.join(format!("{}.{}", REDESIGN_FILE_STEM, payload.file_extension()));
        std::fs::write(&path, payload.decode()?)?;
        saved.redesign = Some(path);
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use interior_ai_common::{Event, ImagePayload, SelectedImage, ShoppingItem};
    use tempfile::tempdir;

    fn result() -> AnalysisResult {
        AnalysisResult {
            design_style: "Mid-Century Modern".to_string(),
            description: "Walnut tones and clean lines.".to_string(),
            shopping_list: vec![
                ShoppingItem {
                    item_name: "Walnut Sideboard".to_string(),
                    category: "Furniture".to_string(),
                    recommendation: "Walnut Veneer".to_string(),
                    estimated_price: "$600 - $900".to_string(),
                },
                ShoppingItem {
                    item_name: "Arc Floor Lamp".to_string(),
                    category: "Lighting".to_string(),
                    recommendation: "Brushed Brass".to_string(),
                    estimated_price: "$120 - $200".to_string(),
                },
            ],
        }
    }

    fn success_session(redesign: Option<&str>) -> Session {
        let mut session = Session::new();
        let image = SelectedImage::new(ImagePayload::new("aGVsbG8=", None), "room.jpg");
        let token = session.apply(Event::ImageSelected(image)).unwrap().token();
        session.apply(Event::AnalysisSucceeded { token, result: result() });
        if let Some(url) = redesign {
            session.apply(Event::VisualizationSucceeded {
                token,
                image_url: url.to_string(),
            });
        }
        session
    }

    #[test]
    fn test_render_analysis() {
        let text = render_analysis(&result());
        assert!(text.contains("Mid-Century Modern"));
        assert!(text.contains("(2件)"));
        assert!(text.contains("1. Walnut Sideboard [Furniture] - Walnut Veneer / $600 - $900"));
        assert!(text.contains("2. Arc Floor Lamp"));
    }

    #[test]
    fn test_save_outputs_with_redesign() {
        let dir = tempdir().expect("Failed to create temp dir");
        let session = success_session(Some("data:image/png;base64,aGVsbG8="));

        let saved = save_outputs(&session, dir.path()).expect("保存失敗");

        let analysis_path = saved.analysis.expect("analysis.json なし");
        let content = std::fs::read_to_string(&analysis_path).unwrap();
        let loaded: AnalysisResult = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, result());

        let redesign_path = saved.redesign.expect("redesign なし");
        assert_eq!(redesign_path.file_name().unwrap(), "redesign.png");
        assert_eq!(std::fs::read(redesign_path).unwrap(), b"hello");
    }

    #[test]
    fn test_save_outputs_without_redesign() {
        let dir = tempdir().expect("Failed to create temp dir");
        let session = success_session(None);

        let saved = save_outputs(&session, dir.path()).unwrap();
        assert!(saved.analysis.is_some());
        assert!(saved.redesign.is_none());
        assert!(!dir.path().join("redesign.png").exists());
    }

    #[test]
    fn test_save_outputs_idle_session_writes_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("out");

        let saved = save_outputs(&Session::new(), &target).unwrap();
        assert!(saved.analysis.is_none());
        assert!(!target.exists());
    }
}
