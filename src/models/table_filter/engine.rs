//! Filter, sort and aggregate over a page's in-memory records.
//!
//! All functions borrow their input and return new vectors of references, so
//! the caller's collection is never reordered or modified.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::fold::fold_text;
use super::{ALL, ColumnDef, ColumnFilterState, Record, SortDirection, SortState, TableState, Value, column_value};

/// Rows passing every active column filter and the free-text search.
///
/// Search is a case- and accent-insensitive substring test against the page's
/// searchable columns, derived columns included. A blank term matches every row.
pub fn apply_filters<'a, I>(
    records: I,
    columns: &[ColumnDef],
    search: &str,
    filters: &ColumnFilterState,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = fold_text(search.trim());
    let active: Vec<(&str, &str)> = filters.active().collect();
    records
        .into_iter()
        .filter(|record| {
            active.iter().all(|(key, wanted)| {
                column_value(columns, record, key).is_some_and(|v| v.normalized() == *wanted)
            })
        })
        .filter(|record| needle.is_empty() || matches_search(record, columns, &needle))
        .collect()
}

fn matches_search(record: &Record, columns: &[ColumnDef], needle: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.searchable)
        .filter_map(|c| c.value_of(record))
        .any(|v| fold_text(&v.normalized()).contains(needle))
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text { folded: fa, raw: ra }, SortKey::Text { folded: fb, raw: rb }) => {
                fa.cmp(fb).then_with(|| ra.cmp(rb))
            }
            (SortKey::Number(_), SortKey::Text { .. }) => Ordering::Less,
            (SortKey::Text { .. }, SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

fn sort_key(value: &Value, numeric: bool) -> Option<SortKey> {
    if numeric {
        return value.as_number().map(SortKey::Number);
    }
    let raw = value.normalized();
    Some(SortKey::Text { folded: fold_text(&raw), raw })
}

/// Stable sort by the active key.
///
/// Text columns compare on their accent- and case-folded form first, with the
/// raw text breaking ties; numeric and derived columns compare numerically. Rows without a usable value go last in either direction.
/// With no direction, or a key that is not a sortable column, the input order
/// is returned unchanged.
pub fn apply_sort<'a>(records: &[&'a Record], columns: &[ColumnDef], sort: &SortState) -> Vec<&'a Record> {
    let (Some(key), Some(direction)) = (sort.key.as_deref(), sort.direction) else {
        return records.to_vec();
    };
    let Some(column) = columns.iter().find(|c| c.key == key && c.sortable) else {
        log::debug!("Sort key '{key}' is not a sortable column, keeping input order");
        return records.to_vec();
    };
    let numeric = column.is_numeric();

    let mut keyed: Vec<(Option<SortKey>, &'a Record)> = records
        .iter()
        .map(|r| (column.value_of(r).and_then(|v| sort_key(&v, numeric)), *r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Row count and per-column sums for the rows actually in view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub count: usize,
    pub sums: BTreeMap<String, f64>,
}

/// Fold over `records`; every numeric column gets a sum, even when zero.
pub fn compute_aggregates(records: &[&Record], columns: &[ColumnDef]) -> Aggregates {
    let mut sums: BTreeMap<String, f64> = columns
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| (c.key.clone(), 0.0))
        .collect();

    for record in records {
        for column in columns.iter().filter(|c| c.is_numeric()) {
            let value = column.value_of(record).and_then(|v| v.as_number()).unwrap_or(0.0);
            if let Some(sum) = sums.get_mut(&column.key) {
                *sum += value;
            }
        }
    }

    Aggregates { count: records.len(), sums }
}

/// Dropdown options for a column filter: `ALL` followed by the distinct
/// normalized values present in `records`.
pub fn distinct_values<'a, I>(records: I, column: &ColumnDef) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let values: BTreeSet<String> = records
        .into_iter()
        .filter_map(|r| column.value_of(r))
        .map(|v| v.normalized())
        .filter(|v| !v.is_empty())
        .collect();
    std::iter::once(ALL.to_string()).chain(values).collect()
}

/// A page's table after filtering, sorting and aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Record>,
    pub aggregates: Aggregates,
}

/// Filter, then sort, then aggregate over the result.
pub fn run<'a>(records: &'a [Record], columns: &[ColumnDef], state: &TableState) -> TableView<'a> {
    let filtered = apply_filters(records, columns, &state.search, &state.filters);
    let rows = apply_sort(&filtered, columns, &state.sort);
    let aggregates = compute_aggregates(&rows, columns);
    log::debug!("Table view: {} of {} rows", rows.len(), records.len());
    TableView { rows, aggregates }
}
