//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Audio Organizer"</h1>
            <p class="subtitle">
                "Send a batch of voice recordings. "
                "Duplicates are removed, similar takes are grouped and generic names are replaced; "
                "you get the result back as a ZIP archive."
            </p>
        </div>
    }
}
