use super::filter::{FilterCriteria, filtered_indices};
use super::model::{Record, RidershipDataset};

// ---------------------------------------------------------------------------
// DatasetFilterEngine
// ---------------------------------------------------------------------------

/// Owns the fetched dataset and the current filter result.
///
/// The dataset is set once by [`load`](Self::load) and never modified;
/// every [`apply`](Self::apply) rescans it from the start, so the result
/// depends only on the criteria passed in.
#[derive(Debug, Default)]
pub struct DatasetFilterEngine {
    dataset: RidershipDataset,
    loaded: bool,
    criteria: FilterCriteria,
    /// Indices into `dataset` passing `criteria` (cached).
    visible: Vec<usize>,
}

impl DatasetFilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest the fetched records and derive the selector options.
    ///
    /// Only the first call takes effect.
    pub fn load(&mut self, records: Vec<Record>) {
        if self.loaded {
            log::warn!(
                "Ignoring second dataset load ({} records); dataset already holds {}",
                records.len(),
                self.dataset.len()
            );
            return;
        }
        self.dataset = RidershipDataset::from_records(records);
        self.loaded = true;
        self.criteria = FilterCriteria::default();
        self.visible = (0..self.dataset.len()).collect();
        log::info!(
            "Loaded {} records ({} years, {} transport types)",
            self.dataset.len(),
            self.dataset.distinct_years().len(),
            self.dataset.distinct_transport_types().len()
        );
    }

    /// Filter the full dataset with `criteria` and return the matching records
    /// in their original order.
    pub fn apply(&mut self, criteria: FilterCriteria) -> Vec<&Record> {
        self.visible = filtered_indices(self.dataset.records(), &criteria);
        log::debug!("{criteria:?} -> {} of {}", self.visible.len(), self.dataset.len());
        self.criteria = criteria;
        self.visible
            .iter()
            .map(|&i| &self.dataset.records()[i])
            .collect()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The current result as `(dataset index, record)` pairs.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.visible
            .iter()
            .map(move |&i| (i, &self.dataset.records()[i]))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.dataset.get(index)
    }

    pub fn dataset(&self) -> &RidershipDataset {
        &self.dataset
    }

    pub fn distinct_years(&self) -> &[String] {
        self.dataset.distinct_years()
    }

    pub fn distinct_transport_types(&self) -> &[String] {
        self.dataset.distinct_transport_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;

    fn rec(year: i64, ty: &str, ridership: i64) -> Record {
        Record::new(
            Some(FieldValue::Integer(year)),
            Some(FieldValue::Text(ty.to_string())),
            Some(FieldValue::Integer(ridership)),
        )
    }

    fn scenario() -> DatasetFilterEngine {
        let mut engine = DatasetFilterEngine::new();
        engine.load(vec![rec(2020, "Bus", 100), rec(2021, "MRT", 200)]);
        engine
    }

    fn larger() -> DatasetFilterEngine {
        let mut engine = DatasetFilterEngine::new();
        engine.load(vec![
            rec(2019, "MRT", 3000),
            rec(2019, "Bus", 4000),
            rec(2020, "MRT", 2000),
            rec(2020, "Bus", 2500),
            Record::new(Some(FieldValue::Integer(2020)), None, None),
            rec(2021, "LRT", 150),
            rec(2021, "Taxi", 500),
            rec(2020, "Bus", 2500),
        ]);
        engine
    }

    fn all_criteria() -> Vec<FilterCriteria> {
        let mut out = Vec::new();
        for s in ["", "b", "MRT", "202", "x"] {
            for y in ["", "2019", "2020", "1999"] {
                for t in ["", "Bus", "MRT", "Ferry"] {
                    out.push(FilterCriteria {
                        search_text: s.into(),
                        year_filter: y.into(),
                        transport_type_filter: t.into(),
                    });
                }
            }
        }
        out
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut engine = scenario();
        let got = engine.apply(FilterCriteria::search("mrt"));
        assert_eq!(got, vec![&rec(2021, "MRT", 200)]);
    }

    #[test]
    fn search_matches_year_text() {
        let mut engine = scenario();
        let got = engine.apply(FilterCriteria::search("2020"));
        assert_eq!(got, vec![&rec(2020, "Bus", 100)]);
    }

    #[test]
    fn year_filter_matches_numeric_year() {
        let mut engine = scenario();
        let got = engine.apply(FilterCriteria::year(2021.to_string()));
        assert_eq!(got, vec![&rec(2021, "MRT", 200)]);
    }

    #[test]
    fn unknown_type_yields_nothing() {
        let mut engine = scenario();
        assert!(engine.apply(FilterCriteria::transport_type("Taxi")).is_empty());
        assert_eq!(engine.visible_len(), 0);
    }

    #[test]
    fn distinct_lists_follow_first_seen_order() {
        let engine = scenario();
        assert_eq!(engine.distinct_years(), ["2020", "2021"]);
        assert_eq!(engine.distinct_transport_types(), ["Bus", "MRT"]);
    }

    #[test]
    fn empty_criteria_returns_dataset_unchanged() {
        let mut engine = larger();
        let expected: Vec<Record> = engine.dataset().records().to_vec();
        let got: Vec<Record> = engine
            .apply(FilterCriteria::default())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn results_are_elements_of_the_dataset() {
        let mut engine = larger();
        for c in all_criteria() {
            let base = engine.dataset().records().as_ptr_range();
            for r in engine.apply(c) {
                let p = r as *const Record;
                assert!(base.contains(&p));
            }
        }
    }

    #[test]
    fn apply_is_idempotent_and_history_free() {
        let mut engine = larger();
        let c = FilterCriteria {
            search_text: "b".into(),
            year_filter: "2020".into(),
            transport_type_filter: String::new(),
        };
        let first: Vec<usize> = {
            engine.apply(c.clone());
            engine.visible().map(|(i, _)| i).collect()
        };
        engine.apply(FilterCriteria::transport_type("MRT"));
        engine.apply(c.clone());
        let second: Vec<usize> = engine.visible().map(|(i, _)| i).collect();
        assert_eq!(first, second);
        assert_eq!(engine.criteria(), &c);
    }

    #[test]
    fn combined_criteria_equal_intersection_of_single_filters() {
        let mut engine = larger();
        for c in all_criteria() {
            engine.apply(FilterCriteria::search(c.search_text.clone()));
            let by_search: Vec<usize> = engine.visible().map(|(i, _)| i).collect();
            engine.apply(FilterCriteria::year(c.year_filter.clone()));
            let by_year: Vec<usize> = engine.visible().map(|(i, _)| i).collect();
            engine.apply(FilterCriteria::transport_type(c.transport_type_filter.clone()));
            let by_type: Vec<usize> = engine.visible().map(|(i, _)| i).collect();

            engine.apply(c.clone());
            let combined: Vec<usize> = engine.visible().map(|(i, _)| i).collect();

            let intersection: Vec<usize> = by_search
                .into_iter()
                .filter(|i| by_year.contains(i) && by_type.contains(i))
                .collect();
            assert_eq!(combined, intersection, "criteria {c:?}");
        }
    }

    #[test]
    fn record_without_type_is_skipped_by_type_filters() {
        let mut engine = larger();
        let got = engine.apply(FilterCriteria {
            search_text: "b".into(),
            year_filter: "2020".into(),
            transport_type_filter: String::new(),
        });
        assert!(got.iter().all(|r| r.transport_type.is_some()));
        let got = engine.apply(FilterCriteria::year("2020"));
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn empty_dataset_filters_to_empty() {
        let mut engine = DatasetFilterEngine::new();
        engine.load(Vec::new());
        assert!(engine.is_loaded());
        assert!(engine.apply(FilterCriteria::search("bus")).is_empty());
        assert!(engine.apply(FilterCriteria::default()).is_empty());
        assert!(engine.distinct_years().is_empty());
    }

    #[test]
    fn unloaded_engine_is_empty() {
        let mut engine = DatasetFilterEngine::new();
        assert!(!engine.is_loaded());
        assert!(engine.apply(FilterCriteria::default()).is_empty());
    }

    #[test]
    fn second_load_is_ignored() {
        let mut engine = scenario();
        engine.load(vec![rec(1999, "Ferry", 1)]);
        assert_eq!(engine.dataset().len(), 2);
        assert_eq!(engine.distinct_transport_types(), ["Bus", "MRT"]);
    }

    #[test]
    fn options_do_not_change_when_filtering() {
        let mut engine = larger();
        let years = engine.distinct_years().to_vec();
        let types = engine.distinct_transport_types().to_vec();
        engine.apply(FilterCriteria::transport_type("MRT"));
        assert_eq!(engine.distinct_years(), years.as_slice());
        assert_eq!(engine.distinct_transport_types(), types.as_slice());
    }
}
