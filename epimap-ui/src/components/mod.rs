//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod map;
pub mod timeline;
pub mod totals;

pub use loading::{CardSkeleton, Loading, MapSkeleton};
pub use map::WorldMap;
pub use timeline::Timeline;
pub use totals::TotalsRow;
