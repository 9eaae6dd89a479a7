//! Core snapshot data types
//!
//! - `CaseRow`: one parsed observation of confirmed/death counts
//! - `Snapshot`: the full row table for one selected date label

use serde::{Deserialize, Serialize};

/// One parsed observation for a country (or a province of one)
///
/// Counts are already coerced at parse time: a field that was not a
/// non-negative number contributes 0. Coordinates that failed to parse
/// are `None` and are excluded from group means downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRow {
    /// Country name, ungrouped and unnormalized
    pub country: String,
    /// Confirmed case count
    pub confirmed: u64,
    /// Death count
    pub deaths: u64,
    /// Latitude in degrees, if the field was parseable
    pub lat: Option<f64>,
    /// Longitude in degrees, if the field was parseable
    pub lon: Option<f64>,
}

impl CaseRow {
    /// Create a row with both coordinates present
    pub fn new(country: impl Into<String>, confirmed: u64, deaths: u64, lat: f64, lon: f64) -> Self {
        Self {
            country: country.into(),
            confirmed,
            deaths,
            lat: Some(lat),
            lon: Some(lon),
        }
    }
}

/// The full row table for one date label
///
/// Immutable once loaded; every load produces a fresh table, so there is
/// no shared mutable state between renders.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Date label the table was loaded for, e.g. `04-2020`
    pub label: String,
    /// Parsed rows in file order
    pub rows: Vec<CaseRow>,
}

impl Snapshot {
    pub fn new(label: impl Into<String>, rows: Vec<CaseRow>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_constructor() {
        let row = CaseRow::new("France", 10, 1, 46.2, 2.2);
        assert_eq!(row.country, "France");
        assert_eq!(row.lat, Some(46.2));
    }

    #[test]
    fn test_snapshot_len() {
        let snap = Snapshot::new("04-2020", vec![CaseRow::new("A", 1, 0, 0.0, 0.0)]);
        assert_eq!(snap.len(), 1);
        assert!(!snap.is_empty());
    }
}
