use std::collections::BTreeSet;

use anyhow::Context;
use log::{debug, error, warn};

use crate::config::DashboardConfig;
use crate::data::aggregate::DashboardSummary;
use crate::data::filter::{filter, init_filter_state, FilterState};
use crate::data::model::{CategoryValue, FilterColumn, SalaryDataset};
use crate::data::source::DataSource;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The session context, independent of rendering: the immutable dataset,
/// the current selection and the outputs computed from them.
pub struct AppState {
    pub config: DashboardConfig,

    /// Where the current (or last attempted) dataset came from.
    pub source: DataSource,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<SalaryDataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Metrics and chart inputs for the current selection (cached).
    pub summary: DashboardSummary,

    /// Set when the last load failed; blocks the dashboard until a retry.
    pub load_error: Option<String>,

    /// Non-fatal message shown in the top bar, e.g. a failed File → Open…
    /// while a dataset is already on screen.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            source: config.source.clone(),
            config,
            dataset: None,
            filters: FilterState::default(),
            summary: DashboardSummary::default(),
            load_error: None,
            status_message: None,
        }
    }

    /// Fetch `source` and replace the session dataset.
    ///
    /// A local file that fails to load while a dataset is on screen only
    /// sets `status_message`; the current dataset and source stay. Any
    /// other failure drops the dataset and sets the blocking `load_error`.
    pub fn load(&mut self, source: DataSource) {
        let result = source
            .load()
            .with_context(|| format!("Failed to load salary data from {source}"));

        match result {
            Ok(dataset) => {
                self.source = source;
                self.set_dataset(dataset);
            }
            Err(e) if matches!(source, DataSource::Path(_)) && self.dataset.is_some() => {
                warn!("{e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
            Err(e) => {
                error!("{e:#}");
                self.source = source;
                self.dataset = None;
                self.filters.clear();
                self.summary = DashboardSummary::default();
                self.load_error = Some(format!("{e:#}"));
                self.status_message = None;
            }
        }
    }

    /// Load the last attempted source again.
    pub fn reload(&mut self) {
        self.load(self.source.clone());
    }

    /// Ingest a newly loaded dataset with every filter value selected.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_state(&dataset);
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.on_selection_changed();
    }

    /// Recompute the filtered view and every aggregation. All selection
    /// mutations funnel through here.
    pub fn on_selection_changed(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let view = filter(ds, &self.filters);
        self.summary = DashboardSummary::compute(&view, &self.config.summary_params());
        debug!("{} of {} records match the current filters", view.len(), ds.len());
    }

    /// Number of records matching the current selection.
    pub fn matching_count(&self) -> usize {
        self.summary.record_count
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &CategoryValue) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.on_selection_changed();
    }

    /// Select all observed values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(all_vals) = self.dataset.as_ref().and_then(|ds| ds.unique_values.get(&column)) {
            self.filters.insert(column, all_vals.clone());
            self.on_selection_changed();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.insert(column, BTreeSet::new());
        self.on_selection_changed();
    }
}
