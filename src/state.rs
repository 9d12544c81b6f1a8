use chrono::NaiveDate;

use crate::data::filter::{filter_table, FilterCriteria, Season};
use crate::data::loader::{BikeDatasets, LoadError};
use crate::data::outliers::clean_table;
use crate::data::summary::DashboardSummary;

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Filtered tables and the aggregations drawn from them.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub tables: BikeDatasets,
    pub summary: DashboardSummary,
}

impl FilteredView {
    /// Derive the view for `criteria` from the cleaned tables.
    pub fn derive(cleaned: &BikeDatasets, criteria: &FilterCriteria) -> Self {
        let tables = BikeDatasets {
            day: filter_table(&cleaned.day, criteria),
            hour: filter_table(&cleaned.hour, criteria),
        };
        let summary = DashboardSummary::compute(&tables.day, &tables.hour);
        FilteredView { tables, summary }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned tables (None if loading failed).
    pub cleaned: Option<BikeDatasets>,

    /// Current date range and season selection.
    pub criteria: FilterCriteria,

    /// View for the current criteria (cached until the criteria change).
    pub view: Option<FilteredView>,

    /// Error shown instead of the dashboard.
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cleaned: None,
            criteria: FilterCriteria::new(NaiveDate::default(), NaiveDate::default(), Season::ALL),
            view: None,
            error_message: None,
        }
    }
}

impl AppState {
    /// Build the state from the startup load. A failed load leaves only the
    /// error message.
    pub fn from_load(result: Result<BikeDatasets, LoadError>) -> Self {
        let mut state = AppState::default();
        match result {
            Ok(raw) => state.set_datasets(raw),
            Err(e) => {
                log::error!("Failed to load data: {e}");
                state.error_message = Some(format!(
                    "Error loading data: {e}. Please check if the data files exist in the correct location."
                ));
            }
        }
        state
    }

    /// Clean freshly loaded tables, reset the criteria to their full span
    /// and derive the first view.
    pub fn set_datasets(&mut self, raw: BikeDatasets) {
        let cleaned = BikeDatasets {
            day: clean_table(&raw.day),
            hour: clean_table(&raw.hour),
        };
        log::info!(
            "Cleaned tables: {} of {} daily rows, {} of {} hourly rows",
            cleaned.day.len(),
            raw.day.len(),
            cleaned.hour.len(),
            raw.hour.len()
        );

        // The picker defaults come from the cleaned daily table.
        self.criteria = FilterCriteria::spanning(&cleaned.day)
            .or_else(|| FilterCriteria::spanning(&cleaned.hour))
            .unwrap_or_else(|| {
                log::warn!("No readable dates in the cleaned tables");
                AppState::default().criteria
            });
        self.cleaned = Some(cleaned);
        self.error_message = None;
        self.refilter();
    }

    pub fn has_data(&self) -> bool {
        self.cleaned.is_some()
    }

    /// Recompute the view after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(cleaned) = &self.cleaned {
            let view = FilteredView::derive(cleaned, &self.criteria);
            log::debug!(
                "Filter {:?}: {} daily, {} hourly rows",
                self.criteria,
                view.tables.day.len(),
                view.tables.hour.len()
            );
            self.view = Some(view);
        }
    }

    /// Apply new criteria, refiltering only when something changed.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.refilter();
        }
    }

    pub fn set_start(&mut self, start: NaiveDate) {
        let mut criteria = self.criteria.clone();
        criteria.start = start;
        self.set_criteria(criteria);
    }

    pub fn set_end(&mut self, end: NaiveDate) {
        let mut criteria = self.criteria.clone();
        criteria.end = end;
        self.set_criteria(criteria);
    }

    /// Toggle a single season in the selection.
    pub fn toggle_season(&mut self, season: Season) {
        let mut criteria = self.criteria.clone();
        if !criteria.seasons.remove(&season) {
            criteria.seasons.insert(season);
        }
        self.set_criteria(criteria);
    }

    /// Select all seasons.
    pub fn select_all_seasons(&mut self) {
        let mut criteria = self.criteria.clone();
        criteria.seasons = Season::ALL.into_iter().collect();
        self.set_criteria(criteria);
    }

    /// Deselect all seasons.
    pub fn select_no_seasons(&mut self) {
        let mut criteria = self.criteria.clone();
        criteria.seasons.clear();
        self.set_criteria(criteria);
    }
}
