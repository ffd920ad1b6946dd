use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Icon identifier handed through to the rendering layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

/// A single navigable sidebar link.
///
/// Empty `allowed_roles` / `allowed_branch_ids` mean "no restriction"; absent
/// fields in a menu file deserialize to empty sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub destination: String,
    pub label: String,
    #[serde(default)]
    pub icon: IconRef,
    /// Match only the exact destination, not paths below it.
    #[serde(default)]
    pub is_terminal_match: bool,
    #[serde(default)]
    pub allowed_roles: BTreeSet<String>,
    #[serde(default)]
    pub allowed_branch_ids: BTreeSet<String>,
}

/// A collapsible container of items sharing its own visibility restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavGroup {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<IconRef>,
    #[serde(default)]
    pub children: Vec<NavItem>,
    #[serde(default)]
    pub allowed_roles: BTreeSet<String>,
    #[serde(default)]
    pub allowed_branch_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntry {
    Item(NavItem),
    Group(NavGroup),
}

/// Shared role/branch predicate for items and groups.
///
/// An empty selection switches branch checks off entirely. Otherwise a
/// restricted entry is visible when any selected branch is allowed.
fn is_visible(
    allowed_roles: &BTreeSet<String>,
    allowed_branch_ids: &BTreeSet<String>,
    role: &str,
    selected_branch_ids: &[String],
) -> bool {
    let role_ok = allowed_roles.is_empty() || allowed_roles.contains(role);
    let branch_ok = selected_branch_ids.is_empty()
        || allowed_branch_ids.is_empty()
        || selected_branch_ids.iter().any(|b| allowed_branch_ids.contains(b));
    role_ok && branch_ok
}

impl NavItem {
    pub fn is_visible_to(&self, role: &str, selected_branch_ids: &[String]) -> bool {
        is_visible(&self.allowed_roles, &self.allowed_branch_ids, role, selected_branch_ids)
    }

    /// Whether `path` selects this item. Terminal items need an exact match;
    /// the others also claim every path nested below their destination.
    pub fn matches_path(&self, path: &str) -> bool {
        let dest = self.destination.trim_end_matches('/');
        let path = path.trim_end_matches('/');
        if self.is_terminal_match || dest.is_empty() {
            return path == dest;
        }
        path == dest || path.strip_prefix(dest).is_some_and(|rest| rest.starts_with('/'))
    }
}

impl NavGroup {
    pub fn is_visible_to(&self, role: &str, selected_branch_ids: &[String]) -> bool {
        is_visible(&self.allowed_roles, &self.allowed_branch_ids, role, selected_branch_ids)
    }
}

/// Keep the items visible to `role` under the current branch selection.
pub fn filter_items(items: &[NavItem], role: &str, selected_branch_ids: &[String]) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(role, selected_branch_ids))
        .cloned()
        .collect()
}

/// Filter groups by their own restriction, then their children; groups left
/// without children are dropped.
pub fn filter_groups(groups: &[NavGroup], role: &str, selected_branch_ids: &[String]) -> Vec<NavGroup> {
    groups
        .iter()
        .filter(|group| group.is_visible_to(role, selected_branch_ids))
        .filter_map(|group| filter_group(group, role, selected_branch_ids))
        .collect()
}

fn filter_group(group: &NavGroup, role: &str, selected_branch_ids: &[String]) -> Option<NavGroup> {
    let children = filter_items(&group.children, role, selected_branch_ids);
    if children.is_empty() {
        return None;
    }
    Some(NavGroup {
        id: group.id.clone(),
        label: group.label.clone(),
        icon: group.icon.clone(),
        children,
        allowed_roles: group.allowed_roles.clone(),
        allowed_branch_ids: group.allowed_branch_ids.clone(),
    })
}

/// Filter a mixed sidebar list, preserving order.
pub fn filter_entries(entries: &[NavEntry], role: &str, selected_branch_ids: &[String]) -> Vec<NavEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            NavEntry::Item(item) => item
                .is_visible_to(role, selected_branch_ids)
                .then(|| NavEntry::Item(item.clone())),
            NavEntry::Group(group) if group.is_visible_to(role, selected_branch_ids) => {
                filter_group(group, role, selected_branch_ids).map(NavEntry::Group)
            }
            NavEntry::Group(_) => None,
        })
        .collect()
}

/// The item selected by the current path, with the group holding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveNav<'a> {
    pub item: &'a NavItem,
    pub group: Option<&'a NavGroup>,
}

/// Longest-destination match wins; on equal length the earlier entry wins.
pub fn find_active<'a>(entries: &'a [NavEntry], current_path: &str) -> Option<ActiveNav<'a>> {
    let mut best: Option<ActiveNav<'a>> = None;
    let mut consider = |item: &'a NavItem, group: Option<&'a NavGroup>| {
        if !item.matches_path(current_path) {
            return;
        }
        let longer = best.is_none_or(|b| item.destination.len() > b.item.destination.len());
        if longer {
            best = Some(ActiveNav { item, group });
        }
    };
    for entry in entries {
        match entry {
            NavEntry::Item(item) => consider(item, None),
            NavEntry::Group(group) => {
                for child in &group.children {
                    consider(child, Some(group));
                }
            }
        }
    }
    best
}

#[derive(Debug)]
pub enum MenuError {
    Parse(serde_json::Error),
    EmptyDestination(String),
    EmptyLabel(String),
    EmptyGroupId(String),
    DuplicateGroupId(String),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::Parse(e) => write!(f, "Menu JSON error: {e}"),
            MenuError::EmptyDestination(label) => write!(f, "Menu item '{label}' has no destination"),
            MenuError::EmptyLabel(dest) => write!(f, "Menu item '{dest}' has no label"),
            MenuError::EmptyGroupId(label) => write!(f, "Menu group '{label}' has no id"),
            MenuError::DuplicateGroupId(id) => write!(f, "Menu group id '{id}' is used more than once"),
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        MenuError::Parse(e)
    }
}

/// The full, unfiltered sidebar as configured for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarConfig {
    pub entries: Vec<NavEntry>,
}

impl SidebarConfig {
    /// Parse and validate a menu definition.
    pub fn from_json(s: &str) -> Result<Self, MenuError> {
        let config: SidebarConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        let mut group_ids: HashSet<&str> = HashSet::new();
        for entry in &self.entries {
            match entry {
                NavEntry::Item(item) => validate_item(item)?,
                NavEntry::Group(group) => {
                    if group.id.trim().is_empty() {
                        return Err(MenuError::EmptyGroupId(group.label.clone()));
                    }
                    if !group_ids.insert(group.id.as_str()) {
                        return Err(MenuError::DuplicateGroupId(group.id.clone()));
                    }
                    for child in &group.children {
                        validate_item(child)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn visible_entries(&self, role: &str, selected_branch_ids: &[String]) -> Vec<NavEntry> {
        filter_entries(&self.entries, role, selected_branch_ids)
    }

    /// Top-level standalone items visible to `role`.
    pub fn get_sidebar_items_for_role(&self, role: &str, selected_branch_ids: &[String]) -> Vec<NavItem> {
        let items: Vec<NavItem> = self
            .entries
            .iter()
            .filter_map(|e| match e {
                NavEntry::Item(item) => Some(item.clone()),
                NavEntry::Group(_) => None,
            })
            .collect();
        filter_items(&items, role, selected_branch_ids)
    }

    /// Groups visible to `role`, each with at least one visible child.
    pub fn get_sidebar_groups_for_role(&self, role: &str, selected_branch_ids: &[String]) -> Vec<NavGroup> {
        let groups: Vec<NavGroup> = self
            .entries
            .iter()
            .filter_map(|e| match e {
                NavEntry::Group(group) => Some(group.clone()),
                NavEntry::Item(_) => None,
            })
            .collect();
        filter_groups(&groups, role, selected_branch_ids)
    }
}

fn validate_item(item: &NavItem) -> Result<(), MenuError> {
    if item.destination.trim().is_empty() {
        return Err(MenuError::EmptyDestination(item.label.clone()));
    }
    if item.label.trim().is_empty() {
        return Err(MenuError::EmptyLabel(item.destination.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(dest: &str, roles: &[&str], branches: &[&str]) -> NavItem {
        NavItem {
            destination: dest.into(),
            label: dest.trim_start_matches('/').into(),
            icon: IconRef("dot".into()),
            is_terminal_match: false,
            allowed_roles: roles.iter().map(|r| r.to_string()).collect(),
            allowed_branch_ids: branches.iter().map(|b| b.to_string()).collect(),
        }
    }

    fn branches(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn role_restriction_keeps_only_matching_role() {
        let items = vec![item("/a", &["admin"], &[]), item("/b", &[], &[])];
        let out = filter_items(&items, "employee", &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].destination, "/b");
    }

    #[test]
    fn branch_restriction_ignored_without_selection() {
        let items = vec![item("/north", &[], &["br-north"])];
        assert_eq!(filter_items(&items, "employee", &[]).len(), 1);
    }

    #[test]
    fn branch_restriction_uses_intersection() {
        let items = vec![item("/north", &[], &["br-north", "br-hq"])];
        assert_eq!(filter_items(&items, "x", &branches(&["br-south", "br-hq"])).len(), 1);
        assert!(filter_items(&items, "x", &branches(&["br-south"])).is_empty());
    }

    #[test]
    fn unrestricted_item_survives_any_branch_selection() {
        let items = vec![item("/open", &[], &[])];
        assert_eq!(filter_items(&items, "x", &branches(&["br-south"])).len(), 1);
    }

    #[test]
    fn group_failing_own_check_is_dropped_even_with_open_children() {
        let group = NavGroup {
            id: "hr".into(),
            label: "HR".into(),
            icon: None,
            children: vec![item("/hr/attendance", &[], &[])],
            allowed_roles: ["admin".to_string()].into_iter().collect(),
            allowed_branch_ids: BTreeSet::new(),
        };
        assert!(filter_groups(&[group], "employee", &[]).is_empty());
    }

    #[test]
    fn mixed_entries_keep_input_order() {
        let entries = vec![
            NavEntry::Item(item("/z", &[], &[])),
            NavEntry::Group(NavGroup {
                id: "g".into(),
                label: "G".into(),
                icon: None,
                children: vec![item("/g/one", &[], &[]), item("/g/two", &["admin"], &[])],
                allowed_roles: BTreeSet::new(),
                allowed_branch_ids: BTreeSet::new(),
            }),
            NavEntry::Item(item("/a", &[], &[])),
        ];
        let out = filter_entries(&entries, "employee", &[]);
        assert_eq!(out.len(), 3);
        match &out[1] {
            NavEntry::Group(g) => {
                assert_eq!(g.children.len(), 1);
                assert_eq!(g.children[0].destination, "/g/one");
            }
            other => panic!("expected group, got {other:?}"),
        }
        match &out[2] {
            NavEntry::Item(i) => assert_eq!(i.destination, "/a"),
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn terminal_item_needs_exact_path() {
        let mut dash = item("/dashboard", &[], &[]);
        dash.is_terminal_match = true;
        assert!(dash.matches_path("/dashboard"));
        assert!(dash.matches_path("/dashboard/"));
        assert!(!dash.matches_path("/dashboard/today"));
    }

    #[test]
    fn non_terminal_item_claims_nested_paths_only_on_segment_boundary() {
        let ledger = item("/accounting/ledger", &[], &[]);
        assert!(ledger.matches_path("/accounting/ledger/42"));
        assert!(!ledger.matches_path("/accounting/ledgers"));
    }

    #[test]
    fn find_active_prefers_longest_destination() {
        let entries = vec![
            NavEntry::Item(item("/stations", &[], &[])),
            NavEntry::Group(NavGroup {
                id: "stations".into(),
                label: "Stations".into(),
                icon: None,
                children: vec![item("/stations/tanks", &[], &[])],
                allowed_roles: BTreeSet::new(),
                allowed_branch_ids: BTreeSet::new(),
            }),
        ];
        let active = find_active(&entries, "/stations/tanks/7").unwrap();
        assert_eq!(active.item.destination, "/stations/tanks");
        assert_eq!(active.group.map(|g| g.id.as_str()), Some("stations"));
        assert!(find_active(&entries, "/nowhere").is_none());
    }

    #[test]
    fn entry_json_uses_kind_discriminant_and_defaults() {
        let json = r#"{"entries":[
            {"kind":"item","destination":"/dashboard","label":"Dashboard","icon":"home"},
            {"kind":"group","id":"hr","label":"HR","children":[
                {"destination":"/hr/payroll","label":"Payroll","allowed_roles":["admin"]}
            ]}
        ]}"#;
        let config = SidebarConfig::from_json(json).unwrap();
        assert_eq!(config.entries.len(), 2);
        match &config.entries[0] {
            NavEntry::Item(i) => {
                assert!(i.allowed_roles.is_empty());
                assert!(!i.is_terminal_match);
                assert_eq!(i.icon, IconRef("home".into()));
            }
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_group_ids_rejected() {
        let json = r#"{"entries":[
            {"kind":"group","id":"hr","label":"HR","children":[{"destination":"/a","label":"A"}]},
            {"kind":"group","id":"hr","label":"HR again","children":[{"destination":"/b","label":"B"}]}
        ]}"#;
        let err = SidebarConfig::from_json(json).unwrap_err();
        assert!(matches!(err, MenuError::DuplicateGroupId(id) if id == "hr"));
    }

    #[test]
    fn missing_kind_is_a_parse_error() {
        let json = r#"{"entries":[{"destination":"/a","label":"A"}]}"#;
        assert!(matches!(SidebarConfig::from_json(json), Err(MenuError::Parse(_))));
    }

    #[test]
    fn empty_destination_rejected() {
        let json = r#"{"entries":[{"kind":"item","destination":" ","label":"Broken"}]}"#;
        assert!(matches!(
            SidebarConfig::from_json(json),
            Err(MenuError::EmptyDestination(label)) if label == "Broken"
        ));
    }
}
