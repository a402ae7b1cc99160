//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ShoppingItem: おすすめアイテム1件
//! - AnalysisResult: スタイル解析の最終出力

use serde::{Deserialize, Serialize};

/// おすすめアイテム
///
/// 一覧内の位置以外に識別子はない（重複も許容）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub item_name: String,
    pub category: String,         // Furniture, Lighting, Decor, Textiles など
    pub recommendation: String,   // 素材・色
    pub estimated_price: String,  // 表示用の価格帯（数値ではない）
}

/// AI解析結果
///
/// 全フィールド必須。欠けているレスポンスはパースエラーになる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub design_style: String,
    pub description: String,
    pub shopping_list: Vec<ShoppingItem>,
}

impl AnalysisResult {
    /// 画像生成プロンプトに渡すアイテム名一覧
    pub fn item_names(&self) -> Vec<String> {
        self.shopping_list
            .iter()
            .map(|item| item.item_name.clone())
            .collect()
    }
}
