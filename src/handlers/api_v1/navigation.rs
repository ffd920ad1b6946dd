use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use super::types::NavigationResponse;
use crate::auth::session::Viewer;
use crate::errors::AppError;
use crate::models::nav_item::find_active;
use crate::models::view_state::ExpandedGroups;
use crate::state::AppState;

/// GET /api/v1/navigation - Sidebar visible to a role/branch selection
/// Query params: role, branches (csv), path (current page), expanded (csv of group ids)
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let viewer = Viewer::from_query(&query);
    let entries = state.menu.visible_entries(&viewer.role, &viewer.branch_ids);
    log::debug!(
        "Navigation for role '{}' on {} branches: {} entries",
        viewer.role,
        viewer.branch_ids.len(),
        entries.len()
    );

    let path = query.get("path").map(String::as_str).unwrap_or("");
    let active = find_active(&entries, path);

    // The group holding the current page always opens
    let mut expanded = query
        .get("expanded")
        .map(|csv| ExpandedGroups::from_csv(csv))
        .unwrap_or_default();
    if let Some(group) = active.and_then(|a| a.group) {
        expanded.expand(&group.id);
    }
    expanded.retain_visible(&entries);
    let active = active.map(|a| a.item.destination.clone());

    Ok(HttpResponse::Ok().json(NavigationResponse {
        app_name: state.app_name.clone(),
        viewer,
        entries,
        active,
        expanded: expanded.ids(),
    }))
}
