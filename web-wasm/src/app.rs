//! メインアプリケーションコンポーネント
//!
//! 状態は `Session` 1つを `RwSignal` で持ち、変更は全て `dispatch` 経由

use interior_ai_common::{
    execute, Event, ImageView, SampleGate, SelectedImage, Session, UploadStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::api::gemini;
use crate::components::{
    analysis_summary::AnalysisSummary, api_key_field::ApiKeyField, footer::Footer,
    header::Header, image_uploader::ImageUploader, preview_card::PreviewCard,
    shopping_list::ShoppingList,
};

/// イベントを適用し、返ってきたコマンドを非同期に実行する
///
/// 完了イベントも同じ経路で戻すため、解析成功からリデザイン生成まで連鎖する
fn dispatch(session: RwSignal<Session>, api_key: ReadSignal<String>, event: Event) {
    let previous = preview_of(session);
    let command = session.try_update(|s| s.apply(event)).flatten();
    gemini::release_preview(previous.as_deref(), preview_of(session).as_deref());

    let Some(command) = command else {
        return;
    };

    debug!("command issued (token {})", command.token().value());
    let client = gemini::gemini_client(api_key.get_untracked());
    spawn_local(async move {
        let event = execute(&client, command).await;
        dispatch(session, api_key, event);
    });
}

fn preview_of(session: RwSignal<Session>) -> Option<String> {
    session.with_untracked(|s| s.preview_url().map(str::to_string))
}

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new());
    let (api_key, set_api_key) = signal(String::new());
    let samples = RwSignal::new(SampleGate::default());

    let on_image_selected =
        move |image: SelectedImage| dispatch(session, api_key, Event::ImageSelected(image));
    let on_reset = move || dispatch(session, api_key, Event::Reset);
    let on_show_view = move |view: ImageView| dispatch(session, api_key, Event::ShowView(view));

    let status = Memo::new(move |_| session.with(|s| s.status()));
    let analysis = Memo::new(move |_| session.with(|s| s.analysis().cloned()));
    let error_message =
        move || session.with(|s| s.error_message().unwrap_or_default().to_string());

    view! {
        <div class="app">
            <Header />

            <main class="container">
                <ApiKeyField api_key=api_key set_api_key=set_api_key />

                <Show when=move || status.get() == UploadStatus::Idle>
                    <div class="intro">
                        <h2>"Transform your space."</h2>
                        <p class="text-muted">
                            "Upload a photo or choose an example below to instantly analyze the style and get curated shopping recommendations tailored to your taste."
                        </p>
                    </div>
                    <ImageUploader
                        api_key=api_key
                        samples=samples
                        on_image_selected=on_image_selected
                    />
                </Show>

                <Show when=move || status.get() != UploadStatus::Idle>
                    <PreviewCard
                        session=session.read_only()
                        on_reset=on_reset
                        on_show_view=on_show_view
                    />
                </Show>

                <Show when=move || status.get() == UploadStatus::Error>
                    <div class="error-banner">
                        <span class="error-icon">"⚠"</span>
                        <p>{error_message}</p>
                        <button class="btn-link" on:click=move |_| on_reset()>
                            "Try Again"
                        </button>
                    </div>
                </Show>

                {move || analysis.get().map(|result| {
                    let items = result.shopping_list.clone();
                    view! {
                        <AnalysisSummary result=result />
                        <ShoppingList items=items />
                    }
                })}
            </main>

            <Footer />
        </div>
    }
}
