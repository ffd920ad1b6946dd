use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::auth::session::Viewer;
use crate::models::nav_item::NavEntry;
use crate::models::page::{Fields, PageSummary};
use crate::models::table_filter::{
    Aggregates, ColumnDef, ColumnFilterState, ColumnKind, Record, SortDirection, SortState, Value,
};

/// Sidebar for one viewer on one path.
#[derive(Serialize, Debug)]
pub struct NavigationResponse {
    pub app_name: String,
    pub viewer: Viewer,
    pub entries: Vec<NavEntry>,
    pub active: Option<String>,
    pub expanded: Vec<String>,
}

/// Column header as rendered: current sort plus the state a click moves to.
#[derive(Serialize, Debug)]
pub struct ColumnView {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    pub visible: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub sort: Option<SortDirection>,
    pub next_sort: SortState,
}

impl ColumnView {
    pub fn build(column: &ColumnDef, sort: &SortState) -> Self {
        ColumnView {
            key: column.key.clone(),
            label: column.label.clone(),
            kind: if column.is_numeric() { ColumnKind::Number } else { column.kind },
            visible: column.visible || column.always_visible,
            sortable: column.sortable,
            filterable: column.filterable,
            sort: sort.direction_for(&column.key),
            next_sort: sort.click(&column.key),
        }
    }
}

/// A row with derived columns materialized for display only.
#[derive(Serialize, Debug)]
pub struct RecordView {
    pub id: u64,
    pub values: BTreeMap<String, Value>,
}

impl RecordView {
    pub fn build(record: &Record, columns: &[ColumnDef]) -> Self {
        let values = columns
            .iter()
            .filter_map(|c| c.value_of(record).map(|v| (c.key.clone(), v.into_owned())))
            .collect();
        RecordView { id: record.id, values }
    }
}

/// Options for the column-filter dropdown that is currently open.
#[derive(Serialize, Debug)]
pub struct DropdownView {
    pub column: String,
    pub selected: String,
    pub options: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct TableResponse {
    pub page: PageSummary,
    pub search: String,
    pub filters: ColumnFilterState,
    pub sort: SortState,
    pub columns: Vec<ColumnView>,
    pub column_pref: String,
    pub rows: Vec<RecordView>,
    pub aggregates: Aggregates,
    pub dropdown: Option<DropdownView>,
}

/// Create/update record request.
#[derive(Deserialize, Debug)]
pub struct RecordRequest {
    pub fields: Fields,
}
