use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::view_state::ActiveDropdown;

pub mod breakdown;
pub mod columns;
pub mod engine;
pub mod fold;

pub use engine::{apply_filters, apply_sort, compute_aggregates, distinct_values, run, Aggregates, TableView};

/// Column-filter value that switches the filter off.
pub const ALL: &str = "ALL";

/// Primitive cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Canonical string form used for exact matching and search.
    /// Whole numbers render without a fractional part.
    pub fn normalized(&self) -> String {
        match self {
            Value::Text(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// One table row. The shape of `fields` is declared per page by its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
}

/// Where a column's value comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSource {
    #[default]
    Stored,
    /// Sum of the `+`-separated quantities held in field `from`.
    Breakdown { from: String },
}

fn default_true() -> bool {
    true
}

/// Ordered column definition for one page's table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: ColumnKind,
    #[serde(default)]
    pub source: ColumnSource,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub searchable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub always_visible: bool,
}

impl ColumnDef {
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Number || self.is_derived()
    }

    pub fn is_derived(&self) -> bool {
        !matches!(self.source, ColumnSource::Stored)
    }

    /// Read this column from `record`. Derived values are computed from their
    /// source field on every call and never stored.
    pub fn value_of<'r>(&self, record: &'r Record) -> Option<Cow<'r, Value>> {
        match &self.source {
            ColumnSource::Stored => record.fields.get(&self.key).map(Cow::Borrowed),
            ColumnSource::Breakdown { from } => record.fields.get(from).map(|source| {
                let total = breakdown::parse_breakdown(&source.normalized());
                Cow::Owned(Value::Number(total))
            }),
        }
    }
}

/// Look up `key` through its column definition, falling back to the raw field.
pub fn column_value<'r>(columns: &[ColumnDef], record: &'r Record, key: &str) -> Option<Cow<'r, Value>> {
    match columns.iter().find(|c| c.key == key) {
        Some(col) => col.value_of(record),
        None => record.fields.get(key).map(Cow::Borrowed),
    }
}

/// Exact-match filters keyed by column. `ALL` or an empty value disables one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilterState(BTreeMap<String, String>);

impl ColumnFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: &str) {
        self.0.insert(column.to_string(), value.to_string());
    }

    pub fn clear(&mut self, column: &str) {
        self.0.remove(column);
    }

    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or(ALL)
    }

    /// Filters that actually restrict rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty() && *v != ALL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort. `direction == None` means "show the base order".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn asc(key: &str) -> Self {
        SortState { key: Some(key.to_string()), direction: Some(SortDirection::Asc) }
    }

    pub fn desc(key: &str) -> Self {
        SortState { key: Some(key.to_string()), direction: Some(SortDirection::Desc) }
    }

    /// `sort`/`dir` request parameters. A key without a direction sorts
    /// ascending; `dir=none` or an empty key leaves the rows unsorted.
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let key = match sort.map(str::trim) {
            Some(k) if !k.is_empty() => k,
            _ => return Self::unsorted(),
        };
        match dir {
            Some("desc") => Self::desc(key),
            Some("none") => Self::unsorted(),
            _ => Self::asc(key),
        }
    }

    /// unsorted → asc → desc → unsorted for one key; another key starts at asc.
    pub fn click(&self, key: &str) -> SortState {
        match (self.key.as_deref(), self.direction) {
            (Some(k), Some(SortDirection::Asc)) if k == key => Self::desc(key),
            (Some(k), Some(SortDirection::Desc)) if k == key => Self::unsorted(),
            _ => Self::asc(key),
        }
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some() && self.direction.is_some()
    }

    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match self.key.as_deref() {
            Some(k) if k == key => self.direction,
            _ => None,
        }
    }

    pub fn dir_str(&self) -> &'static str {
        match self.direction {
            Some(SortDirection::Asc) => "asc",
            Some(SortDirection::Desc) => "desc",
            None => "none",
        }
    }
}

/// Everything one table on one page needs to derive its view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableState {
    pub search: String,
    pub filters: ColumnFilterState,
    pub sort: SortState,
    pub dropdown: ActiveDropdown,
}

impl TableState {
    /// Build from query parameters: `search`, `filter.<column>`, `sort`,
    /// `dir`, and `open` (the column whose dropdown is open).
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let mut filters = ColumnFilterState::new();
        for (param, value) in query {
            if let Some(column) = param.strip_prefix("filter.") {
                if !column.is_empty() {
                    filters.set(column, value);
                }
            }
        }
        let dropdown = match query.get("open").map(|s| s.trim()) {
            Some(col) if !col.is_empty() => ActiveDropdown::open(col),
            _ => ActiveDropdown::default(),
        };
        TableState {
            search: query.get("search").cloned().unwrap_or_default(),
            filters,
            sort: SortState::from_params(
                query.get("sort").map(String::as_str),
                query.get("dir").map(String::as_str),
            ),
            dropdown,
        }
    }
}
