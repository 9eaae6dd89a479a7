//! Dashboard Page
//!
//! The single dashboard view: grand totals, the world map, and the
//! timeline of selectable dates.

use leptos::*;

use crate::api;
use crate::components::{MapSkeleton, Timeline, TotalsRow, WorldMap};
use crate::state::global::{display_label, GlobalState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch the timeline and the first snapshot on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        api::init_dashboard(state_for_effect.clone());
    });

    let state_for_header = state.clone();
    let state_for_map = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"COVID-19 World Dashboard"</h1>
                    <p class="text-gray-400 mt-1">
                        "Confirmed cases and deaths by country, one snapshot per date"
                    </p>
                </div>

                // Selected date display
                <div class="text-sm text-gray-400">
                    {move || {
                        state_for_header.selected.get()
                            .map(|label| display_label(&label))
                            .unwrap_or_default()
                    }}
                </div>
            </div>

            // Grand totals
            <section>
                <TotalsRow />
            </section>

            // World map
            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    let loading = state_for_map.loading.get();
                    let empty = state_for_map.countries.with(|c| c.is_empty());
                    if loading && empty {
                        view! { <MapSkeleton /> }.into_view()
                    } else {
                        view! { <WorldMap /> }.into_view()
                    }
                }}
            </section>

            // Timeline of selectable dates
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Timeline"</h2>
                <Timeline />
            </section>
        </div>
    }
}
