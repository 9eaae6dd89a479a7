//! CSV snapshot loader
//!
//! Parses one dated case-report file into a [`Snapshot`]. Columns are
//! located by header name rather than position, since the column order
//! of the upstream reports changed over time. The numeric coercion
//! policy is explicit here: a count field that does not parse as a
//! non-negative number contributes 0, and a coordinate that does not
//! parse is excluded from downstream means.

use chrono::NaiveDate;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{SnapshotError, SnapshotResult};
use super::types::{CaseRow, Snapshot};

/// Recognized header names, first match wins
const COUNTRY_HEADERS: [&str; 2] = ["Country_Region", "Country/Region"];
const CONFIRMED_HEADERS: [&str; 1] = ["Confirmed"];
const DEATHS_HEADERS: [&str; 1] = ["Deaths"];
const LAT_HEADERS: [&str; 1] = ["Lat"];
const LON_HEADERS: [&str; 2] = ["Long_", "Long"];

/// Reads dated snapshot files out of a data directory
///
/// The store holds no state beyond the directory path; every call to
/// [`SnapshotStore::load`] parses the file fresh and returns a table
/// owned exclusively by the caller.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

/// Resolved column positions for one file
struct Columns {
    country: usize,
    confirmed: usize,
    deaths: usize,
    lat: Option<usize>,
    lon: Option<usize>,
}

impl SnapshotStore {
    /// Create a store rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory this store reads from
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List available date labels, sorted chronologically
    ///
    /// Labels are the file stems of `*.csv` files in the data directory.
    /// Labels that parse as `%m-%Y` (e.g. `04-2020`) sort by date;
    /// anything else sorts after them, alphabetically.
    pub fn labels(&self) -> SnapshotResult<Vec<String>> {
        let mut labels = Vec::new();

        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                labels.push(stem.to_string());
            }
        }

        labels.sort_by(|a, b| match (parse_label(a), parse_label(b)) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });

        Ok(labels)
    }

    /// Load and parse the snapshot for `label`
    ///
    /// The whole snapshot is unavailable if the file is missing or
    /// malformed; there is no partial recovery.
    pub fn load(&self, label: &str) -> SnapshotResult<Snapshot> {
        validate_label(label)?;

        let path = self.data_dir.join(format!("{}.csv", label));
        if !path.exists() {
            return Err(SnapshotError::NotFound(label.to_string()));
        }

        let file = std::fs::File::open(&path)?;
        let rows = parse_rows(file, label)?;

        tracing::debug!(label, rows = rows.len(), "Loaded snapshot");
        Ok(Snapshot::new(label, rows))
    }

    /// Parse a snapshot from an in-memory CSV string (useful for testing)
    pub fn load_str(label: &str, csv_data: &str) -> SnapshotResult<Snapshot> {
        let rows = parse_rows(csv_data.as_bytes(), label)?;
        Ok(Snapshot::new(label, rows))
    }
}

/// Parse all rows out of a CSV reader
fn parse_rows(reader: impl Read, label: &str) -> SnapshotResult<Vec<CaseRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = resolve_columns(&headers, label)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        let country = record
            .get(columns.country)
            .unwrap_or_default()
            .trim()
            .to_string();

        rows.push(CaseRow {
            country,
            confirmed: parse_count(record.get(columns.confirmed).unwrap_or_default()),
            deaths: parse_count(record.get(columns.deaths).unwrap_or_default()),
            lat: columns.lat.and_then(|i| parse_coord(record.get(i).unwrap_or_default())),
            lon: columns.lon.and_then(|i| parse_coord(record.get(i).unwrap_or_default())),
        });
    }

    Ok(rows)
}

/// Locate the required columns in the header row
///
/// Country and count columns are mandatory; a file without them is
/// malformed. Coordinate columns are optional so that count-only
/// extracts still aggregate (their markers just cannot be plotted).
fn resolve_columns(headers: &csv::StringRecord, label: &str) -> SnapshotResult<Columns> {
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.trim() == *n))
    };

    let missing = |column: &str| SnapshotError::MissingColumn {
        label: label.to_string(),
        column: column.to_string(),
    };

    Ok(Columns {
        country: find(&COUNTRY_HEADERS).ok_or_else(|| missing("Country_Region"))?,
        confirmed: find(&CONFIRMED_HEADERS).ok_or_else(|| missing("Confirmed"))?,
        deaths: find(&DEATHS_HEADERS).ok_or_else(|| missing("Deaths"))?,
        lat: find(&LAT_HEADERS),
        lon: find(&LON_HEADERS),
    })
}

/// Coerce a count field to a non-negative integer
///
/// Policy: empty, non-numeric, or negative values contribute 0. Floats
/// are accepted and truncated, since some upstream files carry counts
/// as `123.0`.
pub fn parse_count(field: &str) -> u64 {
    let s = field.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(n) = s.parse::<u64>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f as u64,
        _ => 0,
    }
}

/// Parse a coordinate field, `None` when absent or unparseable
pub fn parse_coord(field: &str) -> Option<f64> {
    let s = field.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a `%m-%Y` date label into a sortable date
fn parse_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01-{}", label), "%d-%m-%Y").ok()
}

/// Reject labels that could address files outside the data directory
fn validate_label(label: &str) -> SnapshotResult<()> {
    let valid = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SnapshotError::InvalidLabel(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Province_State,Country_Region,Last_Update,Lat,Long_,Confirmed,Deaths
,France,2020-04-01,46.2276,2.2137,52128,3523
,Italy,2020-04-01,41.8719,12.5674,105792,12428
Guadeloupe,France,2020-04-01,16.265,-61.551,125,8
";

    #[test]
    fn test_parse_sample() {
        let snap = SnapshotStore::load_str("04-2020", SAMPLE).unwrap();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.rows[0].country, "France");
        assert_eq!(snap.rows[0].confirmed, 52128);
        assert_eq!(snap.rows[2].lat, Some(16.265));
    }

    #[test]
    fn test_columns_found_by_name_not_position() {
        let reordered = "\
Confirmed,Deaths,Country_Region,Lat,Long_
10,1,France,46.0,2.0
";
        let snap = SnapshotStore::load_str("x", reordered).unwrap();
        assert_eq!(snap.rows[0].country, "France");
        assert_eq!(snap.rows[0].confirmed, 10);
    }

    #[test]
    fn test_legacy_header_aliases() {
        let legacy = "\
Province/State,Country/Region,Lat,Long,Confirmed,Deaths
,Spain,40.4,-3.7,8,1
";
        let snap = SnapshotStore::load_str("x", legacy).unwrap();
        assert_eq!(snap.rows[0].country, "Spain");
        assert_eq!(snap.rows[0].lon, Some(-3.7));
    }

    #[test]
    fn test_missing_count_column_is_malformed() {
        let no_deaths = "\
Country_Region,Confirmed
France,10
";
        let err = SnapshotStore::load_str("x", no_deaths).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MissingColumn { ref column, .. } if column == "Deaths"
        ));
    }

    #[test]
    fn test_non_numeric_counts_coerce_to_zero() {
        let messy = "\
Country_Region,Lat,Long_,Confirmed,Deaths
France,46.0,2.0,,3
Italy,41.9,12.6,n/a,-5
Spain,40.4,-3.7,12.0,1
";
        let snap = SnapshotStore::load_str("x", messy).unwrap();
        assert_eq!(snap.rows[0].confirmed, 0); // empty
        assert_eq!(snap.rows[1].confirmed, 0); // garbage
        assert_eq!(snap.rows[1].deaths, 0); // negative
        assert_eq!(snap.rows[2].confirmed, 12); // float form
    }

    #[test]
    fn test_unparseable_coords_become_none() {
        let messy = "\
Country_Region,Lat,Long_,Confirmed,Deaths
France,,2.0,1,0
Italy,abc,12.6,1,0
";
        let snap = SnapshotStore::load_str("x", messy).unwrap();
        assert_eq!(snap.rows[0].lat, None);
        assert_eq!(snap.rows[0].lon, Some(2.0));
        assert_eq!(snap.rows[1].lat, None);
    }

    #[test]
    fn test_empty_file_yields_empty_snapshot() {
        let header_only = "Country_Region,Lat,Long_,Confirmed,Deaths\n";
        let snap = SnapshotStore::load_str("x", header_only).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_parse_count_policy() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count(" 42 "), 42);
        assert_eq!(parse_count("42.9"), 42);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("NaN"), 0);
        assert_eq!(parse_count("inf"), 0);
    }

    #[test]
    fn test_label_validation() {
        assert!(validate_label("04-2020").is_ok());
        assert!(validate_label("snapshot_1").is_ok());
        assert!(validate_label("").is_err());
        assert!(validate_label("../etc/passwd").is_err());
        assert!(validate_label("a/b").is_err());
    }

    #[test]
    fn test_store_load_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        for label in ["07-2020", "04-2020", "01-2023", "notes"] {
            let mut f = std::fs::File::create(dir.path().join(format!("{}.csv", label))).unwrap();
            f.write_all(SAMPLE.as_bytes()).unwrap();
        }
        // Non-CSV files are ignored
        std::fs::File::create(dir.path().join("world.json")).unwrap();

        let store = SnapshotStore::new(dir.path());
        assert_eq!(
            store.labels().unwrap(),
            vec!["04-2020", "07-2020", "01-2023", "notes"]
        );

        let snap = store.load("04-2020").unwrap();
        assert_eq!(snap.label, "04-2020");
        assert_eq!(snap.len(), 3);
    }

    #[test]
    fn test_store_missing_label() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(matches!(
            store.load("05-2020"),
            Err(SnapshotError::NotFound(_))
        ));
    }
}
