use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interior-ai")]
#[command(about = "部屋の写真からインテリアスタイルを解析し、おすすめアイテムとリデザイン画像を生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 部屋の写真を解析（画像もサンプルも未指定ならサンプルを選択）
    Analyze {
        /// 画像ファイル（JPEG/PNG/WEBP など）
        #[arg(conflicts_with = "sample")]
        image: Option<PathBuf>,

        /// サンプル画像番号 (1-3)
        #[arg(short, long)]
        sample: Option<usize>,

        /// 出力ディレクトリ（analysis.json / redesign.*）
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// リデザイン画像を生成しない
        #[arg(long)]
        no_visualize: bool,

        /// 結果をJSONで標準出力
        #[arg(long)]
        json: bool,
    },

    /// サンプル画像の一覧
    Samples,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
