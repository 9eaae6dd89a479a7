//! HTTP API Client
//!
//! Functions for communicating with the epimap REST API.

use gloo_net::http::Request;

use crate::state::global::{CountrySummary, Totals};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("epimap_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("epimap_api_url", url);
        }
    }
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct SnapshotListResponse {
    snapshots: Vec<String>,
}

/// One aggregated snapshot as served by the API
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SnapshotData {
    pub label: String,
    #[serde(default)]
    pub row_count: usize,
    pub totals: Totals,
    #[serde(default)]
    pub hotspot: Option<String>,
    pub countries: Vec<CountrySummary>,
}

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub snapshots: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the error message from a non-OK response
async fn response_error(response: gloo_net::http::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("HTTP {}", status),
    }
}

// ============ API Functions ============

/// Fetch the available snapshot date labels, chronological
pub async fn fetch_snapshot_labels() -> Result<Vec<String>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/snapshots", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(response_error(response).await);
    }

    let result: SnapshotListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.snapshots)
}

/// Fetch the aggregated snapshot for one date label
pub async fn fetch_snapshot(label: &str) -> Result<SnapshotData, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/snapshots/{}", api_base, label))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(response_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();
    let health_url = api_base.replace("/api/v1", "/health");

    let response = Request::get(&health_url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
