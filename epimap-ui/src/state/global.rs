//! Global Application State
//!
//! Reactive state management using Leptos signals.
//!
//! Snapshot loads go through [`GlobalState::load_snapshot`], which stamps
//! every in-flight request with a load token. A response is applied only
//! if its token is still current, so clicking through the timeline fast
//! can never leave a stale snapshot rendered over a newer one.

use leptos::*;

use crate::api;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Available snapshot date labels, chronological
    pub labels: RwSignal<Vec<String>>,
    /// Currently selected date label
    pub selected: RwSignal<Option<String>>,
    /// Per-country aggregates for the selected snapshot
    pub countries: RwSignal<Vec<CountrySummary>>,
    /// Grand totals for the selected snapshot
    pub totals: RwSignal<Totals>,
    /// Country with the most confirmed cases, the annotation target
    pub hotspot: RwSignal<Option<String>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Wall-clock time of the last applied load, for the footer
    pub last_loaded: RwSignal<Option<String>>,
    /// Monotonically increasing epoch for in-flight load supersession
    load_epoch: RwSignal<u64>,
}

/// Per-country aggregate as served by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CountrySummary {
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
    /// Plotting centroid; countries without one are not drawn
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Grand totals as served by the API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Totals {
    pub confirmed: u64,
    pub deaths: u64,
}

/// Token identifying one load request; see [`GlobalState::load_snapshot`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        labels: create_rw_signal(Vec::new()),
        selected: create_rw_signal(None),
        countries: create_rw_signal(Vec::new()),
        totals: create_rw_signal(Totals::default()),
        hotspot: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        last_loaded: create_rw_signal(None),
        load_epoch: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Start a new load, superseding any in-flight one
    pub fn begin_load(&self) -> LoadToken {
        self.load_epoch.update(|e| *e += 1);
        LoadToken(self.load_epoch.get_untracked())
    }

    /// Whether a token still names the newest load
    pub fn is_current(&self, token: LoadToken) -> bool {
        self.load_epoch.get_untracked() == token.0
    }

    /// Load the snapshot for `label` and apply it unless superseded.
    ///
    /// A newer call wins: results arriving for an older token are
    /// dropped on the floor, including their errors.
    pub fn load_snapshot(&self, label: String) {
        let token = self.begin_load();
        self.selected.set(Some(label.clone()));
        self.loading.set(true);

        let state = self.clone();
        spawn_local(async move {
            let result = api::fetch_snapshot(&label).await;

            if !state.is_current(token) {
                return;
            }

            match result {
                Ok(snapshot) => {
                    state.countries.set(snapshot.countries);
                    state.totals.set(snapshot.totals);
                    state.hotspot.set(snapshot.hotspot);
                    state
                        .last_loaded
                        .set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
                }
                Err(e) => {
                    state.show_error(&format!("Failed to load {}: {}", label, e));
                }
            }

            state.loading.set(false);
        });
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Format a count with thousands separators (1234567 -> "1,234,567")
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Turn a `%m-%Y` label into a display name ("04-2020" -> "April 2020")
///
/// Labels that do not parse are shown as-is.
pub fn display_label(label: &str) -> String {
    let parsed = chrono::NaiveDate::parse_from_str(&format!("01-{}", label), "%d-%m-%Y");
    match parsed {
        Ok(date) => date.format("%B %Y").to_string(),
        Err(_) => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("04-2020"), "April 2020");
        assert_eq!(display_label("01-2023"), "January 2023");
        assert_eq!(display_label("latest"), "latest");
    }
}
