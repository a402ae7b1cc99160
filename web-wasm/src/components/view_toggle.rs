//! 元画像 / リデザイン画像の表示切替

use interior_ai_common::{ImageView, Session};
use leptos::prelude::*;

/// リデザインボタンの表示文言
pub fn redesign_label(is_visualizing: bool) -> &'static str {
    if is_visualizing {
        "Generating..."
    } else {
        "AI Redesign"
    }
}

pub fn toggle_class(active: bool) -> &'static str {
    if active {
        "toggle-button active"
    } else {
        "toggle-button"
    }
}

#[component]
pub fn ViewToggle<F>(session: ReadSignal<Session>, on_select: F) -> impl IntoView
where
    F: Fn(ImageView) + 'static + Clone + Send + Sync,
{
    let current = move || session.with(|s| s.view());
    let is_visualizing = move || session.with(|s| s.is_visualizing());
    let can_show_generated = move || session.with(|s| s.can_show_generated());

    let on_original = {
        let on_select = on_select.clone();
        move |_| on_select(ImageView::Original)
    };
    let on_generated = move |_| on_select(ImageView::Generated);

    view! {
        <div class="view-toggle">
            <button
                class=move || toggle_class(current() == ImageView::Original)
                on:click=on_original
            >
                "Original"
            </button>
            <button
                class=move || toggle_class(current() == ImageView::Generated)
                disabled=move || !can_show_generated()
                on:click=on_generated
            >
                <Show when=is_visualizing>
                    <span class="spinner small"></span>
                </Show>
                {move || redesign_label(is_visualizing())}
            </button>
        </div>
    }
}
