//! Result panel (download link) and error banner.

use leptos::*;

use crate::controller::BrowserController;
use crate::state::UiState;

#[component]
pub fn ResultPanel(controller: BrowserController) -> impl IntoView {
    let ui = controller.surface().ui;
    let controller = store_value(controller);

    let href = move || ui.with(|s| s.result().map(|l| l.url.clone()).unwrap_or_default());
    let filename = move || ui.with(|s| s.result().map(|l| l.filename.clone()).unwrap_or_default());
    let size = move || {
        ui.with(|s| s.result().map(|l| l.size).unwrap_or(0)) as f64 / (1024.0 * 1024.0)
    };

    view! {
        <Show
            when=move || ui.with(UiState::result_visible)
            fallback=|| view! { }
        >
            <div class="result" id="result">
                <div class="result-title">"✅ Your recordings are organized"</div>
                <a
                    id="downloadLink"
                    class="download-button"
                    href=href
                    download=filename
                >
                    "Download " {filename} {move || format!(" ({:.1} MB)", size())}
                </a>
                <button
                    class="result-dismiss"
                    on:click=move |_| controller.with_value(|c| c.dismiss_result())
                >
                    "Dismiss"
                </button>
            </div>
        </Show>

        <Show
            when=move || ui.with(|s| s.error().is_some())
            fallback=|| view! { }
        >
            <div class="error-message">
                {move || ui.with(|s| s.error().unwrap_or_default().to_string())}
                <button
                    class="error-dismiss"
                    on:click=move |_| controller.with_value(|c| c.dismiss_error())
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
