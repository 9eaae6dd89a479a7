//! API access
//!
//! HTTP client for the epimap REST API.

pub mod client;

pub use client::{
    check_health, fetch_snapshot, fetch_snapshot_labels, get_api_base, set_api_base,
    SnapshotData,
};

use crate::state::global::GlobalState;

/// Fetch the timeline labels and kick off the initial snapshot load
pub fn init_dashboard(state: GlobalState) {
    leptos::spawn_local(async move {
        state.loading.set(true);

        match fetch_snapshot_labels().await {
            Ok(labels) => {
                let first = labels.first().cloned();
                state.labels.set(labels);

                // The earliest date is the initial view
                if let Some(label) = first {
                    state.load_snapshot(label);
                } else {
                    state.loading.set(false);
                    state.show_error("No snapshots available");
                }
            }
            Err(e) => {
                state.loading.set(false);
                state.show_error(&format!("Failed to fetch timeline: {}", e));
            }
        }
    });
}
