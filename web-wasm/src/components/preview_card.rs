//! 選択画像のプレビュー（リセット、解析中表示、表示切替を含む）

use interior_ai_common::{ImageView, Session, UploadStatus};
use leptos::prelude::*;

use crate::components::view_toggle::ViewToggle;

#[component]
pub fn PreviewCard<FR, FV>(
    session: ReadSignal<Session>,
    on_reset: FR,
    on_show_view: FV,
) -> impl IntoView
where
    FR: Fn() + 'static + Clone + Send + Sync,
    FV: Fn(ImageView) + 'static + Clone + Send + Sync,
{
    let image_url = move || session.with(|s| s.displayed_image_url().map(str::to_string));
    let is_analyzing = move || session.with(|s| s.status() == UploadStatus::Analyzing);
    let is_success = move || session.with(|s| s.status() == UploadStatus::Success);

    view! {
        <div class="preview-wrapper">
            <div class="preview-card">
                {move || image_url().map(|url| view! {
                    <img src=url alt="Uploaded interior" class="preview-image" />
                })}

                // 解析中はリセット不可
                <Show when=move || !is_analyzing()>
                    <button
                        class="reset-button"
                        title="Upload new photo"
                        on:click={
                            let on_reset = on_reset.clone();
                            move |_| on_reset()
                        }
                    >
                        "↻"
                    </button>
                </Show>

                <Show when=is_analyzing>
                    <div class="loading-overlay">
                        <div class="spinner"></div>
                        <p>"Analyzing Design Style..."</p>
                    </div>
                </Show>
            </div>

            <Show when=is_success>
                <ViewToggle session=session on_select=on_show_view.clone() />
            </Show>
        </div>
    }
}
