//! epimap Dashboard
//!
//! COVID-19 world dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - World map with one proportional marker per country
//! - Hover tooltip with confirmed/death counts
//! - Callout annotation on the hotspot country
//! - Clickable timeline of snapshot dates
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. It fetches aggregated snapshots from the epimap REST
//! API and renders them on an HTML5 canvas.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
