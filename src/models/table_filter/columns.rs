// src/models/table_filter/columns.rs
use super::ColumnDef;

/// Apply a comma-separated ordered column string to the full column list.
/// Columns in the string appear first (in order), rest appended hidden at end.
/// An empty or unrecognised preference leaves the page defaults untouched.
pub fn apply_pref(all_columns: &[ColumnDef], pref: &str) -> Vec<ColumnDef> {
    let ordered_keys: Vec<&str> = pref.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    if !ordered_keys.iter().any(|k| all_columns.iter().any(|c| c.key == *k)) {
        return all_columns.to_vec();
    }
    let mut result: Vec<ColumnDef> = vec![];

    // First: columns in pref order, visible if present
    for key in &ordered_keys {
        if result.iter().any(|c| c.key == *key) {
            continue;
        }
        if let Some(col) = all_columns.iter().find(|c| c.key.as_str() == *key) {
            let mut c = col.clone();
            c.visible = true;
            result.push(c);
        }
    }

    // Then: any always_visible columns not yet in result
    for col in all_columns {
        if col.always_visible && !result.iter().any(|c| c.key == col.key) {
            let mut c = col.clone();
            c.visible = true;
            result.push(c);
        }
    }

    // Then: remaining columns hidden
    for col in all_columns {
        if !result.iter().any(|c| c.key == col.key) {
            let mut c = col.clone();
            c.visible = false;
            result.push(c);
        }
    }

    result
}

/// Serialize a Vec<ColumnDef> to a pref string (only visible columns, in order).
pub fn columns_to_pref(columns: &[ColumnDef]) -> String {
    columns.iter()
        .filter(|c| c.visible || c.always_visible)
        .map(|c| c.key.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
