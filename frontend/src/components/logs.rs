//! Activity log panel.
//!
//! Displays the entries the upload controller writes through its surface,
//! with auto-scroll to the newest line.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::types::LogEntry;

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    let scheduled = gloo_utils::window().request_animation_frame(closure.as_ref().unchecked_ref());
    if let Err(e) = scheduled {
        log::warn!("requestAnimationFrame failed: {:?}", e);
        return;
    }
    closure.forget();
}

/// Activity log panel, hidden while empty.
#[component]
pub fn ActivityLog(
    /// Log entries, oldest first
    logs: RwSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    create_effect(move |_| {
        // Track logs changes
        let _ = logs.with(Vec::len);

        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <Show
            when=move || logs.with(|l| !l.is_empty())
            fallback=|| view! { }
        >
            <div class="logs-panel">
                <div class="logs-header">
                    <span class="logs-title">"📋 Activity"</span>
                    <button
                        class="logs-clear"
                        on:click=move |_| logs.set(vec![])
                    >
                        "Clear"
                    </button>
                </div>
                <div class="logs-content" node_ref=logs_container>
                    <For
                        each=move || logs.get().into_iter().enumerate()
                        key=|(i, entry)| (*i, entry.timestamp.clone(), entry.message.clone())
                        children=move |(_, entry)| {
                            view! {
                                <div class=format!("log-entry {}", entry.level.css_class())>
                                    <span class="log-time">"[" {entry.timestamp.clone()} "] "</span>
                                    {entry.message.clone()}
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
