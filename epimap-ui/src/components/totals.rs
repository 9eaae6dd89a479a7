//! Totals Components
//!
//! Stat cards for the grand totals of the selected snapshot.

use leptos::*;

use crate::state::global::{format_count, GlobalState};

/// Row of grand-total stat cards
#[component]
pub fn TotalsRow() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let confirmed = create_memo({
        let state = state.clone();
        move |_| state.totals.get().confirmed
    });
    let deaths = create_memo({
        let state = state.clone();
        move |_| state.totals.get().deaths
    });

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <StatCard title="Total Confirmed Cases" value=confirmed accent="text-red-400" />
            <StatCard title="Total Deaths" value=deaths accent="text-gray-300" />
        </div>
    }
}

/// Single stat card with a formatted count
#[component]
fn StatCard(
    title: &'static str,
    value: Memo<u64>,
    accent: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{title}</span>
            <div class=format!("text-3xl font-bold mt-2 {}", accent)>
                {move || format_count(value.get())}
            </div>
        </div>
    }
}
