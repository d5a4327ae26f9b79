use leptos::*;

use crate::state::UiState;

/// Upload progress bar, visible while a request is in flight.
///
/// Falls back to an indeterminate bar when the browser cannot compute
/// the total.
#[component]
pub fn ProgressSection(ui: RwSignal<UiState>) -> impl IntoView {
    let percent = move || ui.with(|s| s.progress().percent());

    view! {
        <Show
            when=move || ui.with(UiState::progress_visible)
            fallback=|| view! { }
        >
            <div class="progress-container" id="progressContainer">
                <div class="progress-bar">
                    <div
                        class="progress"
                        class:indeterminate=move || percent().is_none()
                        style:width=move || match percent() {
                            Some(p) => format!("{:.0}%", p),
                            None => "100%".to_string(),
                        }
                    ></div>
                </div>
                <div class="progress-label">
                    {move || match percent() {
                        Some(p) if p >= 100.0 => "Processing on the server...".to_string(),
                        Some(p) => format!("Uploading... {:.0}%", p),
                        None => "Uploading...".to_string(),
                    }}
                </div>
            </div>
        </Show>
    }
}
