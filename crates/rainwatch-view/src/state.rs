//! Dashboard session state

use std::sync::Arc;

use tracing::debug;

use rainwatch_core::{
    classify, filter_readings, format_rec_time, highlight, FontSize, Severity, SeverityCounts,
    Span, StationReading,
};
use rainwatch_prefs::{KeyValueStore, Preference};

/// Storage key for the persisted font-size preference.
pub const FONT_SIZE_KEY: &str = "fontSize";

/// What the presentation layer should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Failed(String),
    /// The search query matched nothing; an explicit state, not an error.
    NoMatches,
    Ready,
}

/// One renderable station row: highlighted name, tier, formatted timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub station_no: String,
    pub name: Vec<Span>,
    pub rain: f64,
    pub severity: Severity,
    pub recorded_display: String,
}

/// The view's single shared state between polls.
///
/// The reading snapshot is replaced wholesale on each successful fetch;
/// a failed fetch records an error and keeps the prior snapshot. Fetch
/// outcomes carry the sequence number handed out by `begin_fetch`, and
/// only the latest dispatched sequence may apply, so a slow stale fetch
/// can never overwrite fresher data.
pub struct Dashboard {
    readings: Vec<StationReading>,
    error: Option<String>,
    loading: bool,
    query: String,
    font_size: Preference<FontSize>,
    latest_seq: u64,
}

impl Dashboard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            readings: Vec::new(),
            error: None,
            loading: true,
            query: String::new(),
            font_size: Preference::new(store, FONT_SIZE_KEY, FontSize::default()),
            latest_seq: 0,
        }
    }

    /// One-shot preference load at startup.
    pub fn load_preferences(&mut self) {
        self.font_size.load();
    }

    /// Start a fetch cycle, returning its sequence number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        self.latest_seq
    }

    /// Replace the snapshot with a fetched list. Returns false (and leaves
    /// state untouched) when a newer fetch has been dispatched since.
    pub fn apply_success(&mut self, seq: u64, readings: Vec<StationReading>) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "dropping stale fetch result");
            return false;
        }
        self.readings = readings;
        self.error = None;
        self.loading = false;
        true
    }

    /// Record a fetch failure, retaining the prior snapshot. Stale failures
    /// are dropped like stale successes.
    pub fn apply_failure(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "dropping stale fetch failure");
            return false;
        }
        self.error = Some(message.into());
        self.loading = false;
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        self.font_size.set(size);
    }

    /// Current font size; the default until the preference store is ready.
    pub fn font_size(&self) -> FontSize {
        *self.font_size.get()
    }

    pub fn font_size_ready(&self) -> bool {
        self.font_size.is_ready()
    }

    /// Full unfiltered snapshot.
    pub fn readings(&self) -> &[StationReading] {
        &self.readings
    }

    /// Snapshot filtered by the active search query, original order kept.
    pub fn visible(&self) -> Vec<StationReading> {
        filter_readings(&self.readings, &self.query)
    }

    /// Tier tallies over the full snapshot (not the filtered view).
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::tally(&self.readings)
    }

    pub fn status(&self) -> ViewStatus {
        if self.loading {
            return ViewStatus::Loading;
        }
        if let Some(message) = &self.error {
            return ViewStatus::Failed(message.clone());
        }
        if self.visible().is_empty() {
            return ViewStatus::NoMatches;
        }
        ViewStatus::Ready
    }

    /// Assemble renderable rows for the filtered view.
    pub fn rows(&self) -> Vec<StationRow> {
        self.visible()
            .into_iter()
            .map(|reading| StationRow {
                name: highlight(&reading.station_name, &self.query),
                severity: classify(reading.rain),
                recorded_display: format_rec_time(&reading.rec_time),
                rain: reading.rain,
                station_no: reading.station_no,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainwatch_prefs::MemoryStore;

    fn reading(no: &str, name: &str, rain: f64) -> StationReading {
        StationReading {
            station_no: no.to_string(),
            station_name: name.to_string(),
            rec_time: "202401151230".to_string(),
            rain,
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_initial_state_is_loading() {
        let dash = dashboard();
        assert_eq!(dash.status(), ViewStatus::Loading);
        assert!(dash.readings().is_empty());
    }

    #[test]
    fn test_success_replaces_snapshot_wholesale() {
        let mut dash = dashboard();
        let seq = dash.begin_fetch();
        assert!(dash.apply_success(seq, vec![reading("001", "North", 5.0)]));
        assert_eq!(dash.readings().len(), 1);

        let seq = dash.begin_fetch();
        assert!(dash.apply_success(seq, vec![reading("002", "South", 0.0)]));
        assert_eq!(dash.readings().len(), 1);
        assert_eq!(dash.readings()[0].station_no, "002");
    }

    #[test]
    fn test_stale_fetch_result_is_rejected() {
        let mut dash = dashboard();
        let old_seq = dash.begin_fetch();
        let new_seq = dash.begin_fetch();

        // The newer fetch lands first
        assert!(dash.apply_success(new_seq, vec![reading("002", "Fresh", 1.0)]));
        // The slow old one must not overwrite it
        assert!(!dash.apply_success(old_seq, vec![reading("001", "Stale", 9.0)]));
        assert_eq!(dash.readings()[0].station_name, "Fresh");

        // Stale failures are dropped too
        assert!(!dash.apply_failure(old_seq, "timeout"));
        assert_eq!(dash.status(), ViewStatus::Ready);
    }

    #[test]
    fn test_failure_retains_prior_snapshot() {
        let mut dash = dashboard();
        let seq = dash.begin_fetch();
        dash.apply_success(seq, vec![reading("001", "North", 5.0)]);

        let seq = dash.begin_fetch();
        assert!(dash.apply_failure(seq, "upstream down"));
        assert_eq!(dash.readings().len(), 1);
        assert_eq!(
            dash.status(),
            ViewStatus::Failed("upstream down".to_string())
        );
    }

    #[test]
    fn test_no_match_query_is_a_state_not_an_error() {
        let mut dash = dashboard();
        let seq = dash.begin_fetch();
        dash.apply_success(seq, vec![reading("001", "North", 5.0)]);

        dash.set_query("harbor");
        assert_eq!(dash.status(), ViewStatus::NoMatches);

        dash.set_query("");
        assert_eq!(dash.status(), ViewStatus::Ready);
    }

    #[test]
    fn test_counts_ignore_active_filter() {
        let mut dash = dashboard();
        let seq = dash.begin_fetch();
        dash.apply_success(
            seq,
            vec![reading("001", "North", 0.0), reading("002", "South", 120.0)],
        );
        dash.set_query("North");

        assert_eq!(dash.visible().len(), 1);
        let counts = dash.counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.torrential(), 1);
    }

    #[test]
    fn test_rows_carry_highlight_severity_and_formatted_time() {
        let mut dash = dashboard();
        let seq = dash.begin_fetch();
        dash.apply_success(seq, vec![reading("001", "North Gate", 12.5)]);
        dash.set_query("gate");

        let rows = dash.rows();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.severity, Severity::Moderate);
        assert_eq!(row.recorded_display, "2024/01/15 12:30");
        assert!(row.name.iter().any(|span| span.matched));
    }

    #[test]
    fn test_font_size_defaults_until_ready_then_persists() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let mut dash = Dashboard::new(store.clone());

        assert!(!dash.font_size_ready());
        assert_eq!(dash.font_size(), FontSize::Medium);

        dash.load_preferences();
        assert!(dash.font_size_ready());

        dash.set_font_size(FontSize::Large);
        assert_eq!(store.get(FONT_SIZE_KEY), Some("\"large\"".to_string()));

        // A fresh session sees the persisted choice after its load
        let mut fresh = Dashboard::new(store);
        fresh.load_preferences();
        assert_eq!(fresh.font_size(), FontSize::Large);
    }
}
