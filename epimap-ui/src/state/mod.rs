//! State Management
//!
//! Global application state shared by the dashboard components.

pub mod global;

pub use global::{provide_global_state, CountrySummary, GlobalState, LoadToken, Totals};
