//! Snapshot Routes
//!
//! Read-only endpoints over the dated case reports.
//!
//! - GET /api/v1/snapshots - List available date labels
//! - GET /api/v1/snapshots/:label - Load and aggregate one snapshot

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::aggregate::{hotspot, summarize};
use crate::api::dto::{CountryDto, SnapshotListResponse, SnapshotResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/snapshots
///
/// List available snapshot date labels in chronological order.
pub async fn list_snapshots(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SnapshotListResponse>> {
    let snapshots = state.store.labels()?;

    Ok(Json(SnapshotListResponse {
        total: snapshots.len(),
        snapshots,
    }))
}

/// GET /api/v1/snapshots/:label
///
/// Load the snapshot for `label`, aggregate it by country, and return
/// everything the dashboard renders: grand totals, the hotspot country,
/// and one entry per country for marker placement.
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(label): Path<String>,
) -> ApiResult<Json<SnapshotResponse>> {
    let snapshot = state.store.load(&label)?;
    let summary = summarize(&snapshot.rows);

    let hotspot_country = hotspot(&summary.countries).map(|s| s.country.clone());

    let mut countries: Vec<CountryDto> = summary.countries.values().map(CountryDto::from).collect();
    countries.sort_by(|a, b| a.country.cmp(&b.country));

    tracing::info!(
        label = %snapshot.label,
        rows = snapshot.len(),
        countries = countries.len(),
        confirmed = summary.totals.grand_confirmed,
        "Aggregated snapshot"
    );

    Ok(Json(SnapshotResponse {
        label: snapshot.label,
        row_count: snapshot.rows.len(),
        totals: summary.totals.into(),
        hotspot: hotspot_country,
        countries,
    }))
}
