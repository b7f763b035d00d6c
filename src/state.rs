use crate::color::ColorMap;
use crate::data::engine::DatasetFilterEngine;
use crate::data::filter::FilterCriteria;
use crate::data::model::Record;
use crate::data::source::FetchError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    /// Detail view of the record at this dataset index.
    Details(usize),
    Map,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Fetched dataset and current filter result.
    pub engine: DatasetFilterEngine,

    /// Criteria as edited by the widgets; pushed to the engine on change.
    pub criteria: FilterCriteria,

    /// Colour per transport type.
    pub color_map: Option<ColorMap>,

    pub screen: Screen,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the startup fetch is still in flight.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            engine: DatasetFilterEngine::new(),
            criteria: FilterCriteria::default(),
            color_map: None,
            screen: Screen::Home,
            status_message: None,
            loading: true,
        }
    }
}

impl AppState {
    /// Ingest the fetched records and build the colour map.
    pub fn set_dataset(&mut self, records: Vec<Record>) {
        self.engine.load(records);
        self.color_map = Some(ColorMap::new(self.engine.distinct_transport_types()));
        // Input typed while the fetch was in flight still applies.
        self.refilter();
        self.status_message = None;
        self.loading = false;
    }

    pub fn set_fetch_error(&mut self, err: &FetchError) {
        log::error!("Failed to fetch dataset: {err}");
        self.status_message = Some(format!("Error: {err}"));
        self.loading = false;
    }

    /// Recompute the visible records from the full current criteria.
    pub fn refilter(&mut self) {
        self.engine.apply(self.criteria.clone());
    }

    pub fn set_search_text(&mut self, text: String) {
        self.criteria.search_text = text;
        self.refilter();
    }

    pub fn set_year_filter(&mut self, year: String) {
        self.criteria.year_filter = year;
        self.refilter();
    }

    pub fn set_transport_type_filter(&mut self, transport_type: String) {
        self.criteria.transport_type_filter = transport_type;
        self.refilter();
    }

    pub fn open_details(&mut self, index: usize) {
        if self.engine.record(index).is_some() {
            self.screen = Screen::Details(index);
        }
    }

    pub fn open_map(&mut self) {
        self.screen = Screen::Map;
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                Some(FieldValue::Integer(2020)),
                Some(FieldValue::Text("Bus".into())),
                Some(FieldValue::Integer(100)),
            ),
            Record::new(
                Some(FieldValue::Integer(2021)),
                Some(FieldValue::Text("MRT".into())),
                Some(FieldValue::Integer(200)),
            ),
        ]
    }

    #[test]
    fn dataset_load_clears_loading_and_shows_all() {
        let mut state = AppState::default();
        assert!(state.loading);
        state.set_dataset(records());
        assert!(!state.loading);
        assert_eq!(state.engine.visible_len(), 2);
        assert!(state.color_map.is_some());
    }

    #[test]
    fn each_input_change_refilters_with_full_criteria() {
        let mut state = AppState::default();
        state.set_dataset(records());

        state.set_search_text("b".into());
        assert_eq!(state.engine.visible_len(), 1);

        state.set_year_filter("2021".into());
        assert_eq!(state.engine.visible_len(), 0);

        state.set_search_text(String::new());
        assert_eq!(state.engine.visible_len(), 1);
        assert_eq!(state.engine.criteria(), &FilterCriteria::year("2021"));

        state.set_transport_type_filter("MRT".into());
        state.set_year_filter(String::new());
        assert_eq!(state.engine.visible_len(), 1);
    }

    #[test]
    fn criteria_entered_before_load_apply_after() {
        let mut state = AppState::default();
        state.set_search_text("mrt".into());
        state.set_dataset(records());
        assert_eq!(state.engine.visible_len(), 1);
    }

    #[test]
    fn fetch_error_is_surfaced() {
        let mut state = AppState::default();
        state.set_fetch_error(&FetchError::MissingRecords);
        assert!(!state.loading);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error: response has no result.records array")
        );
        assert_eq!(state.engine.visible_len(), 0);
    }

    #[test]
    fn navigation() {
        let mut state = AppState::default();
        state.set_dataset(records());
        state.open_details(1);
        assert_eq!(state.screen, Screen::Details(1));
        state.go_home();
        state.open_details(7);
        assert_eq!(state.screen, Screen::Home);
        state.open_map();
        assert_eq!(state.screen, Screen::Map);
    }
}
