//! The derivation pipeline: filter, sort, paginate.
//!
//! Pure functions of the row collection and view state. The widget calls
//! them in order on every render.

use std::cmp::Ordering;

use serde_json::Value;

use super::item::{Column, TableRecord};

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The display text of a field value. `None` for null or absent values,
/// which never match a search term and render as a dash.
pub fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Keep a record iff some column's value contains the term,
/// case-insensitively. An empty term keeps everything.
pub fn filter_records(
    records: &[TableRecord],
    columns: &[Column],
    term: &str,
) -> Vec<TableRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    let term = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            columns.iter().any(|col| {
                value_text(record.fields.get(&col.key))
                    .is_some_and(|text| text.to_lowercase().contains(&term))
            })
        })
        .cloned()
        .collect()
}

/// Compare two field values for sorting.
///
/// Null/absent sorts before every defined value (coerced to empty string);
/// two numbers compare numerically; everything else compares as
/// case-insensitive text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(na)), Some(Value::Number(nb))) = (a, b) {
        let na = na.as_f64().unwrap_or(0.0);
        let nb = nb.as_f64().unwrap_or(0.0);
        return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
    }
    let ta = value_text(a).unwrap_or_default().to_lowercase();
    let tb = value_text(b).unwrap_or_default().to_lowercase();
    ta.cmp(&tb)
}

/// Stable sort by the given column. Equal keys keep their input order.
pub fn sort_records(
    mut records: Vec<TableRecord>,
    key: &str,
    direction: SortDirection,
) -> Vec<TableRecord> {
    records.sort_by(|a, b| {
        let ordering = compare_values(a.fields.get(key), b.fields.get(key));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    records
}

/// Total number of pages: at least 1, even for an empty collection.
pub fn total_pages(filtered_len: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    filtered_len.div_ceil(per_page).max(1)
}

/// The window of records shown on a 1-indexed page.
pub fn page_slice(records: &[TableRecord], page: usize, per_page: usize) -> Vec<TableRecord> {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1) * per_page;
    records
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect()
}
