//! Role/branch visibility filtering of the sidebar.

mod common;

use common::*;
use fuelerp::auth::session::Viewer;
use fuelerp::models::nav_item::{NavEntry, filter_entries, filter_groups, filter_items};

fn sample_items() -> Vec<fuelerp::models::nav_item::NavItem> {
    vec![
        item("/a", &["admin"], &[]),
        item("/b", &[], &[]),
        item("/c", &["employee", "manager"], &["br-north"]),
        item("/d", &[], &["br-south", "br-hq"]),
        item("/e", &["employee"], &[]),
    ]
}

#[test]
fn test_only_unrestricted_item_survives_for_employee() {
    let items = vec![item("/admin-only", &["admin"], &[]), item("/open", &[], &[])];
    let out = filter_items(&items, "employee", &[]);
    assert_eq!(out, vec![item("/open", &[], &[])]);
}

#[test]
fn test_filter_items_is_idempotent() {
    let items = sample_items();
    for role in ["admin", "employee", "manager", "driver", ""] {
        for selection in [branches(&[]), branches(&["br-north"]), branches(&["br-hq", "br-south"])] {
            let once = filter_items(&items, role, &selection);
            let twice = filter_items(&once, role, &selection);
            assert_eq!(once, twice, "role {role} branches {selection:?}");
        }
    }
}

#[test]
fn test_absent_and_empty_branch_selection_agree() {
    let items = sample_items();
    let absent = Viewer::from_params(Some("employee"), None);
    let empty = Viewer::from_params(Some("employee"), Some(""));
    assert_eq!(
        filter_items(&items, &absent.role, &absent.branch_ids),
        filter_items(&items, &empty.role, &empty.branch_ids)
    );
    // branch tags are ignored without a selection
    let visible: Vec<String> = filter_items(&items, "employee", &[])
        .into_iter()
        .map(|i| i.destination)
        .collect();
    assert_eq!(visible, vec!["/b", "/c", "/d", "/e"]);
}

#[test]
fn test_branch_selection_restricts_tagged_items() {
    let visible: Vec<String> = filter_items(&sample_items(), "employee", &branches(&["br-hq"]))
        .into_iter()
        .map(|i| i.destination)
        .collect();
    assert_eq!(visible, vec!["/b", "/d", "/e"]);
}

#[test]
fn test_group_with_only_manager_items_hidden_from_employee() {
    let groups = vec![group(
        "reports",
        &[],
        &[],
        vec![item("/reports/a", &["manager"], &[]), item("/reports/b", &["manager"], &[])],
    )];
    assert!(filter_groups(&groups, "employee", &[]).is_empty());
    assert_eq!(filter_groups(&groups, "manager", &[]).len(), 1);
}

#[test]
fn test_filtered_groups_never_empty() {
    let groups = vec![
        group("g1", &[], &[], vec![item("/g1/a", &["admin"], &[])]),
        group("g2", &["employee"], &[], vec![item("/g2/a", &[], &["br-north"])]),
        group("g3", &[], &["br-south"], vec![item("/g3/a", &[], &[]), item("/g3/b", &["admin"], &[])]),
        group("g4", &[], &[], vec![]),
    ];
    for role in ["admin", "employee", "driver"] {
        for selection in [branches(&[]), branches(&["br-north"]), branches(&["br-south"])] {
            for g in filter_groups(&groups, role, &selection) {
                assert!(!g.children.is_empty(), "group {} empty for {role}", g.id);
            }
        }
    }
}

#[test]
fn test_filter_does_not_touch_input() {
    let groups = vec![group("g", &[], &[], vec![item("/g/a", &["admin"], &[]), item("/g/b", &[], &[])])];
    let before = groups.clone();
    let out = filter_groups(&groups, "employee", &[]);
    assert_eq!(groups, before);
    assert_eq!(out[0].children.len(), 1);
}

#[test]
fn test_mixed_entries_keep_order() {
    let entries = vec![
        NavEntry::Item(item("/dashboard", &[], &[])),
        NavEntry::Group(group("hr", &["manager"], &[], vec![item("/hr/staff", &[], &[])])),
        NavEntry::Group(group("docs", &[], &[], vec![item("/docs", &[], &[])])),
        NavEntry::Item(item("/settings", &["admin"], &[])),
    ];
    let visible = filter_entries(&entries, "employee", &[]);
    let kinds: Vec<&str> = visible
        .iter()
        .map(|e| match e {
            NavEntry::Item(i) => i.destination.as_str(),
            NavEntry::Group(g) => g.id.as_str(),
        })
        .collect();
    assert_eq!(kinds, vec!["/dashboard", "docs"]);
}

// --- Seeded sidebar ---

#[test]
fn test_seeded_menu_for_driver() {
    let state = seeded_state();
    let groups: Vec<String> = state
        .menu
        .get_sidebar_groups_for_role("driver", &[])
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(groups, vec!["logistics", "documents", "shops"]);

    let logistics = state
        .menu
        .get_sidebar_groups_for_role("driver", &[])
        .into_iter()
        .find(|g| g.id == "logistics")
        .unwrap();
    let links: Vec<String> = logistics.children.into_iter().map(|c| c.destination).collect();
    assert_eq!(links, vec!["/logistics/deliveries", "/logistics/routes"]);
}

#[test]
fn test_seeded_settings_item_admin_only() {
    let state = seeded_state();
    let admin: Vec<String> = state
        .menu
        .get_sidebar_items_for_role("admin", &[])
        .into_iter()
        .map(|i| i.destination)
        .collect();
    assert_eq!(admin, vec!["/dashboard", "/settings"]);
    assert_eq!(state.menu.get_sidebar_items_for_role("employee", &[]).len(), 1);
}

#[test]
fn test_seeded_branch_scoped_entries() {
    let state = seeded_state();
    let has_group = |role: &str, selection: &[String], id: &str| {
        state
            .menu
            .get_sidebar_groups_for_role(role, selection)
            .iter()
            .any(|g| g.id == id)
    };
    // shops are tagged for HQ and South
    assert!(has_group("employee", &[], "shops"));
    assert!(has_group("employee", &branches(&["br-south"]), "shops"));
    assert!(!has_group("employee", &branches(&["br-north"]), "shops"));

    // tank levels only at stations with tanks
    let tanks_visible = |selection: &[String]| {
        state
            .menu
            .get_sidebar_groups_for_role("employee", selection)
            .into_iter()
            .find(|g| g.id == "stations")
            .is_some_and(|g| g.children.iter().any(|c| c.destination == "/stations/tanks"))
    };
    assert!(tanks_visible(&[]));
    assert!(tanks_visible(&branches(&["br-hq", "br-north"])));
    assert!(!tanks_visible(&branches(&["br-hq"])));
}
