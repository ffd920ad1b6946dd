use chrono::NaiveDate;

use super::types::Fields;
use crate::models::table_filter::{ColumnDef, ColumnSource, Value};

const MAX_TEXT_LEN: usize = 200;

/// Validate a quantity or price: numeric, finite, not negative.
pub fn validate_number(value: &Value, field_name: &str) -> Option<String> {
    match value.as_number() {
        None => Some(format!("{field_name} must be a number")),
        Some(n) if !n.is_finite() => Some(format!("{field_name} must be a number")),
        Some(n) if n < 0.0 => Some(format!("{field_name} must not be negative")),
        Some(_) => None,
    }
}

/// Validate a date: YYYY-MM-DD (empty is OK).
pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} must be a date in YYYY-MM-DD format"));
    }
    None
}

/// Validate a breakdown expression: digits, '.', '+' and spaces only.
pub fn validate_breakdown(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '+' || c == ' ') {
        return Some(format!("{field_name} may only contain numbers joined by '+'"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

fn is_date_column(key: &str) -> bool {
    key == "date" || key.ends_with("_date")
}

fn is_breakdown_source(columns: &[ColumnDef], key: &str) -> bool {
    columns
        .iter()
        .any(|c| matches!(&c.source, ColumnSource::Breakdown { from } if from == key))
}

/// Check submitted fields against a page's columns. Returns every problem
/// found, empty when the fields are acceptable.
pub fn validate_fields(columns: &[ColumnDef], fields: &Fields) -> Vec<String> {
    let mut errors = Vec::new();
    for (key, value) in fields {
        let Some(column) = columns.iter().find(|c| &c.key == key) else {
            errors.push(format!("Unknown column '{key}'"));
            continue;
        };
        if column.is_derived() {
            errors.push(format!("{} is computed and cannot be set", column.label));
            continue;
        }
        if column.is_numeric() {
            errors.extend(validate_number(value, &column.label));
            continue;
        }
        let text = value.normalized();
        errors.extend(validate_optional(&text, &column.label, MAX_TEXT_LEN));
        if is_date_column(key) {
            errors.extend(validate_date(&text, &column.label));
        }
        if is_breakdown_source(columns, key) {
            errors.extend(validate_breakdown(&text, &column.label));
        }
    }
    errors
}

/// Coerce validated fields to their column kinds: numbers become
/// `Value::Number`, text is trimmed.
pub fn normalize_fields(columns: &[ColumnDef], fields: &Fields) -> Fields {
    fields
        .iter()
        .map(|(key, value)| {
            let numeric = columns.iter().any(|c| &c.key == key && c.is_numeric());
            let normalized = match value.as_number() {
                Some(n) if numeric => Value::Number(n),
                _ => Value::Text(value.normalized()),
            };
            (key.clone(), normalized)
        })
        .collect()
}
