//! App Root Component
//!
//! Main application component with global providers, header, footer and
//! the error banner.

use leptos::*;

use crate::pages::Dashboard;
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            // Main content area
            <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                <Dashboard />
            </main>

            // Footer with load status
            <Footer />

            // Error banner
            <ErrorBanner />
        </div>
    }
}

/// Footer component showing load status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let state_for_sync = state.clone();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Snapshot count
                <div class="text-gray-400">
                    {move || {
                        let count = state.labels.with(|l| l.len());
                        format!("{} snapshots available", count)
                    }}
                </div>

                // Last load time
                <div class="text-gray-400">
                    {move || {
                        state_for_sync.last_loaded.get()
                            .map(|at| format!("Loaded at {}", at))
                            .unwrap_or_else(|| "Not loaded".to_string())
                    }}
                </div>

                // Loading indicator
                <LoadingIndicator />
            </div>
        </footer>
    }
}

/// Small spinner shown while a snapshot load is in flight
#[component]
fn LoadingIndicator() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            if state.loading.get() {
                view! {
                    <div class="flex items-center space-x-2 text-red-400">
                        <div class="loading-spinner w-4 h-4" />
                        <span>"Loading..."</span>
                    </div>
                }.into_view()
            } else {
                view! {}.into_view()
            }
        }}
    }
}

/// Auto-clearing error banner
#[component]
fn ErrorBanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let state_for_dismiss = state.clone();

    view! {
        {move || {
            state.error.get().map(|message| {
                let state = state_for_dismiss.clone();
                view! {
                    <div class="fixed top-4 right-4 bg-red-900 border border-red-600 rounded-lg px-4 py-3 text-sm z-20 flex items-center space-x-3">
                        <span>{message}</span>
                        <button
                            class="text-red-300 hover:text-white"
                            on:click=move |_| state.clear_error()
                        >
                            "✕"
                        </button>
                    </div>
                }
            })
        }}
    }
}
