//! Per-country aggregation
//!
//! The core of epimap: turns a raw row table into per-country summaries
//! and grand totals. Both transformations are pure functions over an
//! immutable snapshot; [`summarize`] fuses them into a single pass.
//!
//! The returned map has no defined iteration order. Consumers that need
//! an extremal value (e.g. the annotation target on the dashboard) must
//! search for it explicitly via [`hotspot`] instead of relying on any
//! ordering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::snapshot::CaseRow;

/// Aggregate counts and plotting centroid for one country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountrySummary {
    /// Country name exactly as it appears in the source rows
    pub country: String,
    /// Sum of confirmed cases over all rows for this country
    pub total_confirmed: u64,
    /// Sum of deaths over all rows for this country
    pub total_deaths: u64,
    /// Arithmetic mean of the rows' latitudes, `None` if no row carried
    /// a parseable latitude. Used only as a plotting centroid.
    pub mean_lat: Option<f64>,
    /// Arithmetic mean of the rows' longitudes, same caveats as `mean_lat`
    pub mean_lon: Option<f64>,
}

impl CountrySummary {
    /// The marker centroid, when both coordinates are available
    pub fn centroid(&self) -> Option<(f64, f64)> {
        match (self.mean_lat, self.mean_lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Grand totals across every row of a snapshot
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    pub grand_confirmed: u64,
    pub grand_deaths: u64,
}

/// One snapshot reduced to everything the presentation layer consumes
#[derive(Debug, Clone, Default)]
pub struct SnapshotSummary {
    pub countries: HashMap<String, CountrySummary>,
    pub totals: Totals,
}

/// Running per-country accumulator for the fold in [`summarize`]
#[derive(Debug, Default)]
struct GroupAcc {
    confirmed: u64,
    deaths: u64,
    lat_sum: f64,
    lat_count: u32,
    lon_sum: f64,
    lon_count: u32,
}

impl GroupAcc {
    fn push(&mut self, row: &CaseRow) {
        self.confirmed += row.confirmed;
        self.deaths += row.deaths;
        if let Some(lat) = row.lat {
            self.lat_sum += lat;
            self.lat_count += 1;
        }
        if let Some(lon) = row.lon {
            self.lon_sum += lon;
            self.lon_count += 1;
        }
    }

    fn finish(self, country: &str) -> CountrySummary {
        CountrySummary {
            country: country.to_string(),
            total_confirmed: self.confirmed,
            total_deaths: self.deaths,
            mean_lat: mean(self.lat_sum, self.lat_count),
            mean_lon: mean(self.lon_sum, self.lon_count),
        }
    }
}

fn mean(sum: f64, count: u32) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

/// Group rows by country and reduce each group to a [`CountrySummary`].
///
/// Grouping is exact string equality on the country name; the set of
/// keys in the result equals the set of distinct countries in the input.
/// Empty input yields an empty map.
pub fn aggregate(rows: &[CaseRow]) -> HashMap<String, CountrySummary> {
    summarize(rows).countries
}

/// Compute grand confirmed/death totals across all rows.
pub fn totals(rows: &[CaseRow]) -> Totals {
    rows.iter().fold(Totals::default(), |mut acc, row| {
        acc.grand_confirmed += row.confirmed;
        acc.grand_deaths += row.deaths;
        acc
    })
}

/// Single fused pass computing both the per-country aggregation and the
/// grand totals.
pub fn summarize(rows: &[CaseRow]) -> SnapshotSummary {
    let mut groups: HashMap<&str, GroupAcc> = HashMap::new();
    let mut totals = Totals::default();

    for row in rows {
        totals.grand_confirmed += row.confirmed;
        totals.grand_deaths += row.deaths;
        groups.entry(row.country.as_str()).or_default().push(row);
    }

    let countries = groups
        .into_iter()
        .map(|(country, acc)| (country.to_string(), acc.finish(country)))
        .collect();

    SnapshotSummary { countries, totals }
}

/// Find the country with the most confirmed cases.
///
/// Ties are broken toward the lexicographically smallest country name so
/// the result does not depend on map iteration order.
pub fn hotspot(countries: &HashMap<String, CountrySummary>) -> Option<&CountrySummary> {
    countries.values().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) => {
            if candidate.total_confirmed > current.total_confirmed
                || (candidate.total_confirmed == current.total_confirmed
                    && candidate.country < current.country)
            {
                Some(candidate)
            } else {
                Some(current)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, confirmed: u64, deaths: u64, lat: f64, lon: f64) -> CaseRow {
        CaseRow {
            country: country.to_string(),
            confirmed,
            deaths,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_single_country_two_rows() {
        let rows = vec![row("A", 3, 1, 10.0, 20.0), row("A", 7, 2, 30.0, 40.0)];

        let summaries = aggregate(&rows);
        assert_eq!(summaries.len(), 1);

        let a = &summaries["A"];
        assert_eq!(a.total_confirmed, 10);
        assert_eq!(a.total_deaths, 3);
        assert_eq!(a.mean_lat, Some(20.0));
        assert_eq!(a.mean_lon, Some(30.0));
    }

    #[test]
    fn test_group_keys_match_distinct_countries() {
        let rows = vec![
            row("France", 10, 1, 46.0, 2.0),
            row("Italy", 20, 2, 41.9, 12.6),
            row("France", 5, 0, 47.0, 3.0),
            row("Spain", 8, 1, 40.4, -3.7),
        ];

        let summaries = aggregate(&rows);
        let mut keys: Vec<_> = summaries.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["France", "Italy", "Spain"]);
    }

    #[test]
    fn test_country_sums_equal_grand_totals() {
        let rows = vec![
            row("France", 10, 1, 46.0, 2.0),
            row("Italy", 20, 2, 41.9, 12.6),
            row("France", 5, 0, 47.0, 3.0),
            row("Spain", 8, 1, 40.4, -3.7),
        ];

        let summaries = aggregate(&rows);
        let grand = totals(&rows);

        let confirmed_sum: u64 = summaries.values().map(|s| s.total_confirmed).sum();
        let deaths_sum: u64 = summaries.values().map(|s| s.total_deaths).sum();

        assert_eq!(confirmed_sum, grand.grand_confirmed);
        assert_eq!(deaths_sum, grand.grand_deaths);
    }

    #[test]
    fn test_no_case_sensitivity_normalization() {
        // "US" and "us" are distinct keys on purpose
        let rows = vec![row("US", 1, 0, 40.0, -100.0), row("us", 2, 0, 40.0, -100.0)];
        assert_eq!(aggregate(&rows).len(), 2);
    }

    #[test]
    fn test_missing_coordinates_excluded_from_mean() {
        let rows = vec![
            CaseRow {
                country: "A".to_string(),
                confirmed: 1,
                deaths: 0,
                lat: Some(10.0),
                lon: None,
            },
            CaseRow {
                country: "A".to_string(),
                confirmed: 1,
                deaths: 0,
                lat: Some(30.0),
                lon: Some(50.0),
            },
        ];

        let summaries = aggregate(&rows);
        let a = &summaries["A"];
        // lat averages both rows, lon only the row that had one
        assert_eq!(a.mean_lat, Some(20.0));
        assert_eq!(a.mean_lon, Some(50.0));
        assert_eq!(a.centroid(), Some((20.0, 50.0)));
    }

    #[test]
    fn test_no_coordinates_yields_none() {
        let rows = vec![CaseRow {
            country: "A".to_string(),
            confirmed: 1,
            deaths: 0,
            lat: None,
            lon: None,
        }];

        let a = &aggregate(&rows)["A"];
        assert_eq!(a.mean_lat, None);
        assert_eq!(a.centroid(), None);
    }

    #[test]
    fn test_idempotent_over_immutable_input() {
        let rows = vec![
            row("France", 10, 1, 46.0, 2.0),
            row("Italy", 20, 2, 41.9, 12.6),
        ];

        let first = aggregate(&rows);
        let second = aggregate(&rows);
        assert_eq!(first, second);
        assert_eq!(totals(&rows), totals(&rows));
    }

    #[test]
    fn test_summarize_matches_separate_passes() {
        let rows = vec![
            row("France", 10, 1, 46.0, 2.0),
            row("Italy", 20, 2, 41.9, 12.6),
            row("Italy", 1, 1, 45.0, 9.0),
        ];

        let fused = summarize(&rows);
        assert_eq!(fused.countries, aggregate(&rows));
        assert_eq!(fused.totals, totals(&rows));
    }

    #[test]
    fn test_hotspot_finds_max_confirmed() {
        let rows = vec![
            row("France", 10, 1, 46.0, 2.0),
            row("Italy", 20, 2, 41.9, 12.6),
            row("Spain", 8, 1, 40.4, -3.7),
        ];

        let summaries = aggregate(&rows);
        let top = hotspot(&summaries).unwrap();
        assert_eq!(top.country, "Italy");
    }

    #[test]
    fn test_hotspot_tie_breaks_by_name() {
        let rows = vec![row("B", 5, 0, 0.0, 0.0), row("A", 5, 0, 0.0, 0.0)];
        let summaries = aggregate(&rows);
        assert_eq!(hotspot(&summaries).unwrap().country, "A");
    }

    #[test]
    fn test_hotspot_empty() {
        assert!(hotspot(&HashMap::new()).is_none());
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        // Realistic worst case: hundreds of rows in the hundreds of millions
        let rows: Vec<CaseRow> = (0..500).map(|_| row("World", 700_000_000, 7_000_000, 0.0, 0.0)).collect();
        let grand = totals(&rows);
        assert_eq!(grand.grand_confirmed, 350_000_000_000);
    }
}
