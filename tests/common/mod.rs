//! Shared fixtures for integration tests.
//!
//! - `item()` / `group()` build navigation entries with role/branch tags
//! - `column()` / `record()` build table fixtures
//! - `seeded_state()` loads the embedded menu and report pages

#![allow(dead_code)]

use std::collections::BTreeSet;

use fuelerp::config::AppConfig;
use fuelerp::models::nav_item::{IconRef, NavGroup, NavItem};
use fuelerp::models::table_filter::{ColumnDef, ColumnKind, ColumnSource, Record, Value};
use fuelerp::state::AppState;

// ============================================================================
// NAVIGATION
// ============================================================================

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn item(destination: &str, roles: &[&str], branches: &[&str]) -> NavItem {
    NavItem {
        destination: destination.to_string(),
        label: destination.trim_start_matches('/').to_string(),
        icon: IconRef("circle".to_string()),
        is_terminal_match: false,
        allowed_roles: set(roles),
        allowed_branch_ids: set(branches),
    }
}

pub fn group(id: &str, roles: &[&str], branches: &[&str], children: Vec<NavItem>) -> NavGroup {
    NavGroup {
        id: id.to_string(),
        label: id.to_uppercase(),
        icon: None,
        children,
        allowed_roles: set(roles),
        allowed_branch_ids: set(branches),
    }
}

pub fn branches(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|b| b.to_string()).collect()
}

// ============================================================================
// TABLES
// ============================================================================

pub fn column(key: &str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        key: key.to_string(),
        label: key.to_string(),
        kind,
        source: ColumnSource::Stored,
        sortable: true,
        filterable: true,
        searchable: true,
        visible: true,
        always_visible: false,
    }
}

pub fn breakdown_column(key: &str, from: &str) -> ColumnDef {
    ColumnDef {
        source: ColumnSource::Breakdown { from: from.to_string() },
        ..column(key, ColumnKind::Number)
    }
}

pub fn record(id: u64, fields: &[(&str, Value)]) -> Record {
    Record {
        id,
        fields: fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
    }
}

pub fn ids(rows: &[&Record]) -> Vec<u64> {
    rows.iter().map(|r| r.id).collect()
}

// ============================================================================
// APPLICATION
// ============================================================================

/// Application state from the embedded seeds, as the server starts it.
pub fn seeded_state() -> AppState {
    AppState::load(&AppConfig::default()).expect("embedded seeds load")
}
