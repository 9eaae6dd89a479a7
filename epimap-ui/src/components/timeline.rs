//! Timeline Component
//!
//! One button per available snapshot date. Clicking a date loads that
//! snapshot through the superseding load path in [`GlobalState`], so
//! rapid clicks cannot interleave renders out of order.
//!
//! [`GlobalState`]: crate::state::global::GlobalState

use leptos::*;

use crate::state::global::{display_label, GlobalState};

/// Row of selectable snapshot dates
#[component]
pub fn Timeline() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex flex-wrap justify-center gap-2">
            {move || {
                state.labels.get()
                    .into_iter()
                    .map(|label| view! { <TimelineButton label /> })
                    .collect_view()
            }}
        </div>
    }
}

/// One date button
#[component]
fn TimelineButton(label: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let label_for_active = label.clone();
    let state_for_active = state.clone();
    let is_active = create_memo(move |_| {
        state_for_active.selected.get().as_deref() == Some(label_for_active.as_str())
    });

    let label_for_click = label.clone();
    let on_click = move |_| {
        state.load_snapshot(label_for_click.clone());
    };

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if is_active.get() {
                    format!("{} bg-red-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {display_label(&label)}
        </button>
    }
}
