//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - build_analysis_prompt: スタイル解析用プロンプト
//! - analysis_response_schema: 解析レスポンスのJSONスキーマ
//! - build_visualization_prompt: リデザイン画像生成用プロンプト

use serde_json::json;

/// 解析プロンプトで要求するアイテム数
pub const SHOPPING_ITEMS_MIN: usize = 5;
pub const SHOPPING_ITEMS_MAX: usize = 8;

/// スタイル解析プロンプト生成
pub fn build_analysis_prompt() -> String {
    format!(
        r#"Analyze this interior design image.
1. Identify the specific Design Style (e.g., Scandinavian, Industrial, Mid-Century Modern, etc.).
2. Provide a brief, engaging description of the style elements present in the room (max 2 sentences).
3. Generate a 'Shopping List' of {min}-{max} items that are either visible in the photo or would perfectly complement this specific style. Include estimated prices in USD.

Return the result in strictly structured JSON."#,
        min = SHOPPING_ITEMS_MIN,
        max = SHOPPING_ITEMS_MAX,
    )
}

/// 解析レスポンスのスキーマ（generationConfig.responseSchema）
///
/// 全フィールド必須・全て文字列（shoppingListのみ配列）
pub fn analysis_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "designStyle": {
                "type": "STRING",
                "description": "The primary interior design style identified."
            },
            "description": {
                "type": "STRING",
                "description": "A short description of the room's style and atmosphere."
            },
            "shoppingList": {
                "type": "ARRAY",
                "description": "A list of recommended furniture and decor items.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "itemName": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "description": "e.g., Furniture, Lighting, Decor, Textiles"
                        },
                        "recommendation": {
                            "type": "STRING",
                            "description": "Specific material or color recommendation (e.g., 'Oak Wood', 'Matte Black Metal')"
                        },
                        "estimatedPrice": {
                            "type": "STRING",
                            "description": "Estimated price range (e.g., '$150 - $300')"
                        }
                    },
                    "required": ["itemName", "category", "recommendation", "estimatedPrice"]
                }
            }
        },
        "required": ["designStyle", "description", "shoppingList"]
    })
}

/// リデザイン画像生成プロンプト
///
/// # Arguments
/// * `design_style` - 解析で特定したスタイル名
/// * `item_names` - 追加するアイテム名（解析結果の順）
pub fn build_visualization_prompt(design_style: &str, item_names: &[String]) -> String {
    let items = if item_names.is_empty() {
        "complementary furniture and decor".to_string()
    } else {
        item_names.join(", ")
    };

    format!(
        r#"Edit this photo of an interior room. Keep the room's structure exactly as it is: walls, windows, doors, floor and overall layout must not change.
Add the following items to the room, styled in a {design_style} interior design style: {items}.
Place each item where it would naturally belong, and match the original photo's lighting, shadows, camera angle and perspective so the result looks like a real photograph of the same room."#
    )
}
