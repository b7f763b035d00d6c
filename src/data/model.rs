use std::collections::HashSet;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// FieldValue – a loosely typed cell from the API
// ---------------------------------------------------------------------------

/// A dynamically-typed scalar as it arrives in the datastore JSON.
///
/// data.gov.sg serves most numbers as strings, but exported dumps and other
/// mirrors carry real JSON numbers, so both are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl FieldValue {
    /// Convert a JSON scalar; `null` (and a missing key upstream) becomes `None`.
    pub fn from_json(val: &JsonValue) -> Option<Self> {
        match val {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(FieldValue::Text(s.clone())),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Some(FieldValue::Float(f))
                } else {
                    Some(FieldValue::Text(n.to_string()))
                }
            }
            JsonValue::Bool(b) => Some(FieldValue::Text(b.to_string())),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }

    /// Interpret the value as an `f64`, parsing numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the ridership table
// ---------------------------------------------------------------------------

/// A single ridership row. Every field may be missing in the upstream data.
///
/// `year` is always held as text: numeric years are normalised with
/// [`FieldValue`]'s `Display`, so `2020` and `"2020"` compare equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub year: Option<String>,
    pub transport_type: Option<String>,
    pub average_ridership: Option<FieldValue>,
}

impl Record {
    pub fn new(
        year: Option<FieldValue>,
        transport_type: Option<FieldValue>,
        average_ridership: Option<FieldValue>,
    ) -> Self {
        Record {
            year: year.map(|v| v.to_string()),
            transport_type: transport_type.map(|v| v.to_string()),
            average_ridership,
        }
    }

    /// Year text, or `""` when absent.
    pub fn year_text(&self) -> &str {
        self.year.as_deref().unwrap_or("")
    }

    /// Transport type, or `""` when absent.
    pub fn transport_type_text(&self) -> &str {
        self.transport_type.as_deref().unwrap_or("")
    }

    pub fn display_transport_type(&self) -> &str {
        match self.transport_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Unknown Transport",
        }
    }

    pub fn display_year(&self) -> &str {
        match self.year.as_deref() {
            Some(y) if !y.is_empty() => y,
            _ => "N/A",
        }
    }

    pub fn display_ridership(&self) -> String {
        match &self.average_ridership {
            Some(FieldValue::Text(s)) if s.is_empty() => "N/A".to_string(),
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RidershipDataset – the complete fetched dataset
// ---------------------------------------------------------------------------

/// The full fetched dataset with its selector options pre-computed.
#[derive(Debug, Clone, Default)]
pub struct RidershipDataset {
    records: Vec<Record>,
    /// Distinct years, first-seen order.
    distinct_years: Vec<String>,
    /// Distinct transport types, first-seen order.
    distinct_transport_types: Vec<String>,
}

impl RidershipDataset {
    /// Build the distinct-value lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let distinct_years = distinct_in_order(records.iter().map(|r| r.year.as_deref()));
        let distinct_transport_types =
            distinct_in_order(records.iter().map(|r| r.transport_type.as_deref()));
        RidershipDataset {
            records,
            distinct_years,
            distinct_transport_types,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn distinct_years(&self) -> &[String] {
        &self.distinct_years
    }

    pub fn distinct_transport_types(&self) -> &[String] {
        &self.distinct_transport_types
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Insertion-order-preserving dedup. Absent and empty values are skipped:
/// an empty selection means "no constraint", so they could never be chosen.
fn distinct_in_order<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for v in values.flatten().filter(|v| !v.is_empty()) {
        if seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}
