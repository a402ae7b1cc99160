//! 画像アップロードコンポーネント
//!
//! ドラッグ&ドロップ、クリックでのファイル選択、サンプル画像の3経路。
//! APIキー未入力の間は無効

use interior_ai_common::{is_image_media_type, SampleGate, SelectedImage, SAMPLE_IMAGES};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};

use crate::api::gemini;

const NOT_AN_IMAGE_MESSAGE: &str = "Please upload an image file.";
const SAMPLE_FAILED_MESSAGE: &str = "Could not load the demo image. Please try again.";

pub fn drop_zone_class(is_dragover: bool, is_enabled: bool, is_busy: bool) -> String {
    let mut classes = vec!["upload-area"];
    if is_dragover {
        classes.push("dragover");
    }
    if !is_enabled || is_busy {
        classes.push("disabled");
    }
    classes.join(" ")
}

/// 読み込み中のサンプルは強調、それ以外は薄く表示
pub fn sample_button_class(index: usize, gate: SampleGate) -> String {
    let mut classes = vec!["sample-button"];
    match gate.loading_index() {
        Some(loading) if loading == index => classes.push("loading"),
        Some(_) => classes.push("dimmed"),
        None => {}
    }
    classes.join(" ")
}

#[component]
pub fn ImageUploader<F>(
    api_key: ReadSignal<String>,
    samples: RwSignal<SampleGate>,
    on_image_selected: F,
) -> impl IntoView
where
    F: Fn(SelectedImage) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();
    let is_enabled = move || !api_key.get().is_empty();
    let is_busy = move || samples.with(|g| g.is_busy());

    let handle_file = {
        let on_image_selected = on_image_selected.clone();
        move |file: File| {
            if !is_image_media_type(&file.type_()) {
                gloo::dialogs::alert(NOT_AN_IMAGE_MESSAGE);
                return;
            }
            let on_image_selected = on_image_selected.clone();
            spawn_local(async move {
                match gemini::read_file(file).await {
                    Ok(image) => on_image_selected(image),
                    Err(e) => {
                        error!("Error reading image file: {}", e);
                        gloo::dialogs::alert(NOT_AN_IMAGE_MESSAGE);
                    }
                }
            });
        }
    };

    let on_drop = {
        let handle_file = handle_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if !is_enabled() || is_busy() {
                return;
            }

            // 複数ドロップされても先頭の1枚のみ
            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                handle_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if !is_enabled() || is_busy() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            handle_file(file);
        }
        // 同じファイルを再選択できるように
        input.set_value("");
    };

    let load_sample = move |index: usize| {
        if !is_enabled() {
            return;
        }
        if !samples.try_update(|g| g.try_begin(index)).unwrap_or(false) {
            return;
        }
        let on_image_selected = on_image_selected.clone();
        spawn_local(async move {
            let result = gemini::fetch_sample(index).await;
            samples.update(|g| g.finish());
            match result {
                Ok(image) => on_image_selected(image),
                Err(e) => {
                    error!("Error loading sample image: {}", e);
                    gloo::dialogs::alert(SAMPLE_FAILED_MESSAGE);
                }
            }
        });
    };

    let sample_buttons = SAMPLE_IMAGES
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let load_sample = load_sample.clone();
            view! {
                <button
                    class=move || sample_button_class(index, samples.get())
                    disabled=move || is_busy() || !is_enabled()
                    on:click=move |_| load_sample(index)
                >
                    <img src=sample.url alt=sample.label />
                    <span class="sample-label">{sample.label}</span>
                    <Show when=move || samples.with(|g| g.loading_index() == Some(index))>
                        <div class="sample-loading"><span class="spinner small"></span></div>
                    </Show>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="uploader">
            <div
                class=move || drop_zone_class(is_dragover.get(), is_enabled(), is_busy())
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <input
                    type="file"
                    accept="image/*"
                    class="hidden"
                    node_ref=input_ref
                    disabled=move || !is_enabled() || is_busy()
                    on:change=on_change
                />
                <Show
                    when=is_enabled
                    fallback=|| view! {
                        <div class="upload-icon">"🔑"</div>
                        <p>"Enter your API key to get started"</p>
                        <p class="text-muted">"Set a Gemini API key above to upload photos."</p>
                    }
                >
                    <div class="upload-icon">"☁"</div>
                    <p>"Upload an interior photo"</p>
                    <p class="text-muted">"Drag and drop or click to browse"</p>
                    <p class="text-muted small">"JPG, PNG, WEBP"</p>
                </Show>
            </div>

            <div class="samples">
                <p class="samples-title">"✦ Or try an example"</p>
                <div class="sample-grid">{sample_buttons}</div>
            </div>
        </div>
    }
}
