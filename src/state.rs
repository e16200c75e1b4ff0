use std::collections::BTreeMap;

use crate::color::SiteColors;
use crate::data::aggregate::{filtered_indices, outcome_counts};
use crate::data::model::{LaunchDataset, Outcome, Selection, SiteFilter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// How scatter points are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colour by outcome class (the dashboard's default).
    #[default]
    Outcome,
    /// Colour by launch site, one palette hue per site.
    Site,
}

/// The full UI state, independent of rendering.
///
/// The dataset is read-only once ingested; the charts draw from the derived
/// caches (`counts`, `scatter_indices`), which only the input handlers below
/// rebuild.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current (site, payload range) selection.
    pub selection: Selection,

    /// Outcome counts for the proportion chart (cached).
    pub counts: BTreeMap<Outcome, usize>,

    /// Indices of records passing the current selection (cached), feeding the
    /// scatter chart and the records table.
    pub scatter_indices: Vec<usize>,

    /// Scatter-point colouring mode.
    pub color_mode: ColorMode,

    /// Per-site colours for `ColorMode::Site`.
    pub site_colors: SiteColors,

    /// Whether the records table is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            counts: BTreeMap::new(),
            scatter_indices: Vec::new(),
            color_mode: ColorMode::default(),
            site_colors: SiteColors::default(),
            show_table: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the selection to the full range,
    /// rebuild the site colours, and refresh both chart caches.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.selection = Selection::full(&dataset);
        self.site_colors = SiteColors::new(&dataset.sites);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_counts();
        self.rebuild_scatter();
    }

    /// Site-selector handler.  Both charts depend on the site, so both
    /// caches are rebuilt.
    pub fn set_site_filter(&mut self, site: SiteFilter) {
        self.selection.site = site;
        self.rebuild_counts();
        self.rebuild_scatter();
    }

    /// Payload-range handler.  Only the scatter subset depends on the range;
    /// the outcome counts stay as they are.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        self.selection.payload_range = (low, high);
        self.rebuild_scatter();
    }

    fn rebuild_counts(&mut self) {
        self.counts = match &self.dataset {
            Some(ds) => outcome_counts(ds, &self.selection.site),
            None => BTreeMap::new(),
        };
    }

    fn rebuild_scatter(&mut self) {
        self.scatter_indices = match &self.dataset {
            Some(ds) => {
                let (low, high) = self.selection.payload_range;
                filtered_indices(ds, &self.selection.site, low, high)
            }
            None => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, payload: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            flight_number: None,
            booster_version: None,
            booster_category: None,
        }
    }

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, Outcome::Success),
            record("CCAFS LC-40", 4000.0, Outcome::Failure),
            record("VAFB SLC-4E", 2000.0, Outcome::Success),
            record("VAFB SLC-4E", 9600.0, Outcome::Success),
        ])
    }

    #[test]
    fn ingesting_a_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.selection.site, SiteFilter::All);
        assert_eq!(state.selection.payload_range, (500.0, 9600.0));
        assert_eq!(state.scatter_indices, vec![0, 1, 2, 3]);
        assert_eq!(state.counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn site_change_rebuilds_both_caches() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_site_filter(SiteFilter::Site("VAFB SLC-4E".to_string()));
        assert_eq!(state.counts.get(&Outcome::Success), Some(&2));
        assert_eq!(state.counts.get(&Outcome::Failure), None);
        assert_eq!(state.scatter_indices, vec![2, 3]);
    }

    #[test]
    fn payload_change_rebuilds_only_the_scatter() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let counts_before = state.counts.clone();

        state.set_payload_range(1000.0, 5000.0);
        assert_eq!(state.counts, counts_before);
        assert_eq!(state.scatter_indices, vec![1, 2]);
    }

    #[test]
    fn reloading_replaces_the_selection_wholesale() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_site_filter(SiteFilter::Site("CCAFS LC-40".to_string()));
        state.set_payload_range(1000.0, 2000.0);

        state.set_dataset(LaunchDataset::from_records(vec![record(
            "KSC LC-39A",
            3170.0,
            Outcome::Success,
        )]));
        assert_eq!(state.selection.site, SiteFilter::All);
        assert_eq!(state.selection.payload_range, (3170.0, 3170.0));
        assert_eq!(state.scatter_indices, vec![0]);
    }

    #[test]
    fn handlers_without_a_dataset_keep_the_caches_empty() {
        let mut state = AppState::default();
        state.set_site_filter(SiteFilter::Site("KSC LC-39A".to_string()));
        state.set_payload_range(0.0, 100.0);

        assert!(state.counts.is_empty());
        assert!(state.scatter_indices.is_empty());
    }
}
