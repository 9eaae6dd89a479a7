//! Snapshot loading
//!
//! Reads per-date CSV case reports into immutable row tables. One file
//! per date label (e.g. `04-2020.csv`); each load produces a fresh,
//! unshared [`Snapshot`] owned by the caller.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{SnapshotError, SnapshotResult};
pub use loader::SnapshotStore;
pub use types::{CaseRow, Snapshot};
