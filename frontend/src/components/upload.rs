//! Audio upload component: file picker, processing options and send button.
//!
//! Clicking send hands the current selection to the upload controller.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::{ACCEPTED_EXTENSIONS, DEFAULT_KEEP_FORMATS, DEFAULT_N_WORDS};
use crate::controller::BrowserController;
use crate::state::UiState;
use crate::types::{FileSelection, ProcessOptions};

#[component]
pub fn UploadSection(controller: BrowserController) -> impl IntoView {
    let ui = controller.surface().ui;
    let controller = store_value(controller);

    let (selection, set_selection) = create_signal(FileSelection::<File>::default());
    let (options, set_options) = create_signal(ProcessOptions::default());
    let (formats_text, set_formats_text) = create_signal(DEFAULT_KEEP_FORMATS.join(","));

    let on_files_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = input
            .files()
            .map(|list| FileSelection::from_file_list(&list))
            .unwrap_or_default();
        log::debug!("{} file(s) selected", files.len());
        set_selection.set(files);
    };

    let on_send = move |_| {
        let controller = controller.get_value();
        let files = selection.get_untracked();
        let opts = options
            .get_untracked()
            .with_keep_formats(&formats_text.get_untracked());

        spawn_local(async move {
            match controller.submit(&files, &opts).await {
                Ok(outcome) => log::debug!("Upload cycle done: {} file(s) sent", outcome.files_sent),
                Err(e) => log::debug!("Upload cycle ended: {}", e),
            }
        });
    };

    let on_n_words = move |ev: Event| {
        let n_words = event_target_value(&ev)
            .parse::<i64>()
            .unwrap_or(DEFAULT_N_WORDS as i64);
        set_options.update(|o| *o = o.clone().with_n_words(n_words));
    };

    let on_keep_prefix = move |ev: Event| {
        let keep_prefix = event_target_checked(&ev);
        set_options.update(|o| o.keep_prefix = keep_prefix);
    };

    let is_uploading = move || ui.with(UiState::is_uploading);

    view! {
        <div class="upload-section" id="uploadZone">
            <div class="upload-icon">"🎙️"</div>
            <div class="upload-text">
                {move || if is_uploading() {
                    "⏳ Uploading and processing..."
                } else {
                    "Select your recordings"
                }}
            </div>
            <div class="upload-hint">"WAV, M4A, MP3 or a ZIP archive"</div>

            <input
                type="file"
                id="audioInput"
                accept=ACCEPTED_EXTENSIONS
                multiple=true
                on:change=on_files_change
            />

            <div class="selection-summary">
                {move || selection.with(|s| {
                    if s.is_empty() {
                        "No file selected".to_string()
                    } else {
                        format!(
                            "{} file(s), {:.1} MB",
                            s.len(),
                            s.total_size() as f64 / (1024.0 * 1024.0)
                        )
                    }
                })}
            </div>

            <fieldset class="options" disabled=is_uploading>
                <label>
                    "Words used to rename generic recordings "
                    <input
                        type="number"
                        min="1"
                        max="5"
                        prop:value=move || options.with(|o| o.n_words.to_string())
                        on:change=on_n_words
                    />
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || options.with(|o| o.keep_prefix)
                        on:change=on_keep_prefix
                    />
                    " Keep numbering prefix (001-VA-1_)"
                </label>
                <label>
                    "Formats to keep "
                    <input
                        type="text"
                        prop:value=move || formats_text.get()
                        on:input=move |ev| set_formats_text.set(event_target_value(&ev))
                    />
                </label>
            </fieldset>

            <button
                id="sendBtn"
                class="upload-button"
                disabled=is_uploading
                on:click=on_send
            >
                "Send"
            </button>
        </div>
    }
}
