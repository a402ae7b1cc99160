//! 解析結果（スタイル名と説明）

use interior_ai_common::AnalysisResult;
use leptos::prelude::*;

#[component]
pub fn AnalysisSummary(result: AnalysisResult) -> impl IntoView {
    view! {
        <section class="analysis-summary">
            <div class="section-label">
                <span class="sparkle">"✦"</span>
                <h2>"Analysis Result"</h2>
            </div>
            <h3 class="design-style">{result.design_style}</h3>
            <p class="description">{result.description}</p>
        </section>
    }
}
