use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use interior_ai::{cli, config, error, gemini, ingest, report};
use interior_ai_common::{
    run_to_completion, Command, Event, RunObserver, SelectedImage, Session, UploadStatus,
    SAMPLE_IMAGES,
};
use cli::{Cli, Commands};
use config::Config;
use error::{InteriorAiError, Result};
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, sample, output, no_visualize, json } => {
            println!("🛋️  interior-ai - スタイル解析\n");

            // APIキーは取り込み前に確認
            let settings = config.gemini_settings()?;
            let http = gemini::http_client(&config)?;

            // 1. 画像取り込み
            println!("[1/3] 画像を読み込み中...");
            let selected = select_image(&http, image, sample).await?;
            println!(
                "✔ {} ({})\n",
                selected.preview_url, selected.payload.mime_type
            );

            // 2-3. 解析 → リデザイン
            let client = gemini::gemini_client(settings, http);
            let mut session = Session::new();
            let mut progress = StepProgress::new(no_visualize);
            run_to_completion(&client, &mut session, Event::ImageSelected(selected), &mut progress)
                .await;

            if session.status() == UploadStatus::Error {
                let message = session
                    .error_message()
                    .unwrap_or(interior_ai_common::ANALYSIS_FAILED_MESSAGE)
                    .to_string();
                return Err(InteriorAiError::AnalysisFailed(message));
            }

            if let Some(analysis) = session.analysis() {
                if json {
                    println!("{}", serde_json::to_string_pretty(analysis)?);
                } else {
                    println!("\n{}", report::render_analysis(analysis));
                }
            }

            if !no_visualize && session.generated_image().is_none() {
                println!("⚠ リデザイン画像は生成されませんでした");
            }

            let saved = report::save_outputs(&session, &output)?;
            if let Some(path) = saved.analysis {
                println!("✔ 解析結果を保存: {}", path.display());
            }
            if let Some(path) = saved.redesign {
                println!("✔ リデザイン画像を保存: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Samples => {
            println!("サンプル画像:");
            for (i, sample) in SAMPLE_IMAGES.iter().enumerate() {
                println!("  {}. {}", i + 1, sample.label);
                println!("     {}", sample.url);
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  解析モデル: {}", config.analysis_model);
                println!("  画像モデル: {}", config.image_model);
                println!("  API: {}", config.api_base_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

/// RUST_LOG 未指定時は warn、--verbose で自クレートのみ debug
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,interior_ai=debug,interior_ai_common=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// 取り込み対象を決める（ファイル > サンプル番号 > 対話選択）
async fn select_image(
    http: &reqwest::Client,
    image: Option<PathBuf>,
    sample: Option<usize>,
) -> Result<SelectedImage> {
    if let Some(path) = image {
        return ingest::load_file(&path);
    }

    let number = match sample {
        Some(number) => number,
        None => {
            let labels: Vec<&str> = SAMPLE_IMAGES.iter().map(|s| s.label).collect();
            let index = Select::new()
                .with_prompt("サンプル画像を選択")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(|e| InteriorAiError::Prompt(e.to_string()))?;
            index + 1
        }
    };

    ingest::fetch_sample(http, number).await
}

/// 解析・リデザインの各ステップをスピナーで表示
struct StepProgress {
    no_visualize: bool,
    running: Option<(ProgressBar, &'static str)>,
}

impl StepProgress {
    fn new(no_visualize: bool) -> Self {
        Self {
            no_visualize,
            running: None,
        }
    }
}

impl RunObserver for StepProgress {
    fn on_command(&mut self, command: &Command) -> bool {
        let (label, done) = match command {
            Command::StartAnalysis { .. } => ("[2/3] AI解析中...", "✔ 解析完了"),
            Command::StartVisualization { .. } if self.no_visualize => {
                println!("[3/3] リデザイン画像の生成をスキップ");
                return false;
            }
            Command::StartVisualization { .. } => {
                ("[3/3] リデザイン画像を生成中...", "✔ リデザイン処理完了")
            }
        };
        self.running = Some((spinner(label), done));
        true
    }

    fn on_event(&mut self, _event: &Event) {
        if let Some((spinner, done)) = self.running.take() {
            spinner.finish_and_clear();
            println!("{}", done);
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
