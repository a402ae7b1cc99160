//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="brand">
                <span class="brand-icon">"▦"</span>
                <h1>"InteriorAI"</h1>
            </div>
            <nav>
                <a href="#" class="nav-link">"About"</a>
            </nav>
        </header>
    }
}
