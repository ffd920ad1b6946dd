// Page-scoped UI state. Each page instance owns its own copies; nothing here
// is shared between pages or requests.

use std::collections::BTreeSet;

use serde::Serialize;

use super::nav_item::NavEntry;
use crate::auth::session::split_csv;

/// Sidebar groups currently expanded on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExpandedGroups(BTreeSet<String>);

impl ExpandedGroups {
    pub fn from_csv(csv: &str) -> Self {
        ExpandedGroups(split_csv(csv).into_iter().collect())
    }

    pub fn is_expanded(&self, group_id: &str) -> bool {
        self.0.contains(group_id)
    }

    pub fn expand(&mut self, group_id: &str) {
        self.0.insert(group_id.to_string());
    }

    pub fn toggle(&mut self, group_id: &str) {
        if !self.0.remove(group_id) {
            self.0.insert(group_id.to_string());
        }
    }

    /// Forget groups that are not part of the rendered sidebar.
    pub fn retain_visible(&mut self, entries: &[NavEntry]) {
        let visible: BTreeSet<&str> = entries
            .iter()
            .filter_map(|e| match e {
                NavEntry::Group(g) => Some(g.id.as_str()),
                NavEntry::Item(_) => None,
            })
            .collect();
        self.0.retain(|id| visible.contains(id.as_str()));
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// The one column-filter dropdown open in a table, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActiveDropdown(Option<String>);

impl ActiveDropdown {
    pub fn open(column: &str) -> Self {
        ActiveDropdown(Some(column.to_string()))
    }

    /// Clicking the open column closes it; clicking another one switches.
    pub fn toggle(&mut self, column: &str) {
        if self.is_open(column) {
            self.0 = None;
        } else {
            self.0 = Some(column.to_string());
        }
    }

    pub fn close(&mut self) {
        self.0 = None;
    }

    pub fn is_open(&self, column: &str) -> bool {
        self.0.as_deref() == Some(column)
    }

    pub fn column(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
