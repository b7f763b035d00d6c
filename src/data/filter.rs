use super::model::Record;

// ---------------------------------------------------------------------------
// Filter criteria: free-text search plus two exact-match selectors
// ---------------------------------------------------------------------------

/// The full set of user filters. An empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub year_filter: String,
    pub transport_type_filter: String,
}

#[cfg(test)]
impl FilterCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        FilterCriteria {
            search_text: text.into(),
            ..Default::default()
        }
    }

    pub fn year(year: impl Into<String>) -> Self {
        FilterCriteria {
            year_filter: year.into(),
            ..Default::default()
        }
    }

    pub fn transport_type(ty: impl Into<String>) -> Self {
        FilterCriteria {
            transport_type_filter: ty.into(),
            ..Default::default()
        }
    }
}

impl FilterCriteria {
    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.year_filter.is_empty()
            && self.transport_type_filter.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether a record passes all active filters.
///
/// A record passes when:
/// * `search_text` is empty, or it occurs (case-insensitively) in the
///   transport type or the year text
/// * `year_filter` is empty, or equals the year text exactly
/// * `transport_type_filter` is empty, or equals the transport type exactly
///
/// Absent fields are searched as `""` and never equal a non-empty filter.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    if !criteria.search_text.is_empty() {
        let needle = criteria.search_text.to_lowercase();
        let in_type = record
            .transport_type_text()
            .to_lowercase()
            .contains(&needle);
        let in_year = record.year_text().to_lowercase().contains(&needle);
        if !in_type && !in_year {
            return false;
        }
    }

    if !criteria.year_filter.is_empty()
        && record.year.as_deref() != Some(criteria.year_filter.as_str())
    {
        return false;
    }

    if !criteria.transport_type_filter.is_empty()
        && record.transport_type.as_deref() != Some(criteria.transport_type_filter.as_str())
    {
        return false;
    }

    true
}

/// Return indices of records that pass all active filters, in dataset order.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, criteria))
        .map(|(i, _)| i)
        .collect()
}
