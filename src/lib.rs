//! # epimap
//!
//! COVID-19 snapshot dashboard backend: loads per-date CSV case reports,
//! aggregates case/death counts by country, and serves the results to a
//! world-map dashboard.
//!
//! ## Modules
//!
//! - [`snapshot`]: dated CSV case-report loading
//! - [`aggregate`]: per-country aggregation and grand totals (the core)
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use epimap::aggregate::{hotspot, summarize};
//! use epimap::snapshot::SnapshotStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SnapshotStore::new("./data");
//!
//!     // One file per selectable date label
//!     for label in store.labels()? {
//!         let snapshot = store.load(&label)?;
//!         let summary = summarize(&snapshot.rows);
//!
//!         println!(
//!             "{}: {} confirmed, {} deaths across {} countries",
//!             label,
//!             summary.totals.grand_confirmed,
//!             summary.totals.grand_deaths,
//!             summary.countries.len(),
//!         );
//!
//!         if let Some(top) = hotspot(&summary.countries) {
//!             println!("  hotspot: {}", top.country);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod snapshot;

// Re-export top-level types for convenience
pub use aggregate::{aggregate, hotspot, summarize, totals, CountrySummary, SnapshotSummary, Totals};

pub use snapshot::{CaseRow, Snapshot, SnapshotError, SnapshotResult, SnapshotStore};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
