use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::table_filter::{ColumnDef, Record, Value};

/// Field values submitted for a new or edited row.
pub type Fields = BTreeMap<String, Value>;

/// One report page as it appears in the seed file: its table layout and
/// the rows it starts with.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSeed {
    pub id: String,
    pub title: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<Fields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesFile {
    pub pages: Vec<PageSeed>,
}

/// A page and the record collection it owns.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub columns: Vec<ColumnDef>,
    pub records: Vec<Record>,
    pub(crate) next_id: u64,
}

/// For the page index.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub record_count: usize,
}

impl From<&Page> for PageSummary {
    fn from(p: &Page) -> Self {
        PageSummary {
            id: p.id.clone(),
            title: p.title.clone(),
            record_count: p.records.len(),
        }
    }
}
