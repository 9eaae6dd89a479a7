//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::aggregate::{CountrySummary, Totals};

// ============================================
// SNAPSHOT DTOs
// ============================================

/// List of available snapshot date labels
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotListResponse {
    pub total: usize,
    /// Labels in chronological order
    pub snapshots: Vec<String>,
}

/// Grand totals for a snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsDto {
    pub confirmed: u64,
    pub deaths: u64,
}

impl From<Totals> for TotalsDto {
    fn from(t: Totals) -> Self {
        Self {
            confirmed: t.grand_confirmed,
            deaths: t.grand_deaths,
        }
    }
}

/// Per-country aggregate for map-marker placement
#[derive(Debug, Serialize, Deserialize)]
pub struct CountryDto {
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
    /// Plotting centroid; null when no row carried coordinates
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl From<&CountrySummary> for CountryDto {
    fn from(s: &CountrySummary) -> Self {
        Self {
            country: s.country.clone(),
            confirmed: s.total_confirmed,
            deaths: s.total_deaths,
            lat: s.mean_lat,
            lon: s.mean_lon,
        }
    }
}

/// One aggregated snapshot, everything the dashboard renders
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub label: String,
    /// Number of raw rows the aggregates were computed from
    pub row_count: usize,
    pub totals: TotalsDto,
    /// Country with the most confirmed cases, the annotation target
    pub hotspot: Option<String>,
    /// Sorted by country name for a stable wire format; consumers must
    /// not attach meaning to the order
    pub countries: Vec<CountryDto>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub data_dir: String,
    /// Number of snapshot files currently available
    pub snapshots: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
