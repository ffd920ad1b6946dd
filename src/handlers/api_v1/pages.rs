use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use super::types::{ColumnView, DropdownView, RecordRequest, RecordView, TableResponse};
use crate::errors::AppError;
use crate::models::page::PageSummary;
use crate::models::table_filter::{self, TableState, columns};
use crate::state::AppState;

/// GET /api/v1/pages - List report pages
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let pages = state.pages()?;
    Ok(HttpResponse::Ok().json(pages.summaries()))
}

/// GET /api/v1/pages/{page_id}/records - Filtered, sorted table view
/// Query params: search, filter.<column>, sort, dir (asc|desc|none),
/// open (column whose filter dropdown is open), columns (csv column preference)
pub async fn list_records(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let page_id = path.into_inner();
    let pages = state.pages()?;
    let page = pages.find(&page_id).ok_or(AppError::NotFound)?;

    let table = TableState::from_query(&query);
    let layout = match query.get("columns") {
        Some(pref) => columns::apply_pref(&page.columns, pref),
        None => page.columns.clone(),
    };

    let view = table_filter::run(&page.records, &page.columns, &table);

    let dropdown = table
        .dropdown
        .column()
        .and_then(|key| page.columns.iter().find(|c| c.key == key && c.filterable))
        .map(|col| DropdownView {
            column: col.key.clone(),
            selected: table.filters.get(&col.key).to_string(),
            options: table_filter::distinct_values(&page.records, col),
        });

    let response = TableResponse {
        page: PageSummary::from(page),
        columns: layout.iter().map(|c| ColumnView::build(c, &table.sort)).collect(),
        column_pref: columns::columns_to_pref(&layout),
        rows: view.rows.iter().map(|r| RecordView::build(r, &page.columns)).collect(),
        aggregates: view.aggregates,
        dropdown,
        search: table.search,
        filters: table.filters,
        sort: table.sort,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/pages/{page_id}/records/{record_id} - Single record
pub async fn read_record(
    state: web::Data<AppState>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
    let (page_id, record_id) = path.into_inner();
    let pages = state.pages()?;
    let page = pages.find(&page_id).ok_or(AppError::NotFound)?;
    let record = pages.get(&page_id, record_id)?;
    Ok(HttpResponse::Ok().json(RecordView::build(record, &page.columns)))
}

/// POST /api/v1/pages/{page_id}/records - Create record
pub async fn create_record(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RecordRequest>,
) -> Result<HttpResponse, AppError> {
    let page_id = path.into_inner();
    let mut pages = state.pages_mut()?;
    let record = pages.create(&page_id, &body.fields)?;
    let page = pages.find(&page_id).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(RecordView::build(&record, &page.columns)))
}

/// PUT /api/v1/pages/{page_id}/records/{record_id} - Replace record fields
pub async fn update_record(
    state: web::Data<AppState>,
    path: web::Path<(String, u64)>,
    body: web::Json<RecordRequest>,
) -> Result<HttpResponse, AppError> {
    let (page_id, record_id) = path.into_inner();
    let mut pages = state.pages_mut()?;
    let record = pages.update(&page_id, record_id, &body.fields)?;
    let page = pages.find(&page_id).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(RecordView::build(&record, &page.columns)))
}

/// DELETE /api/v1/pages/{page_id}/records/{record_id} - Delete record
pub async fn delete_record(
    state: web::Data<AppState>,
    path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
    let (page_id, record_id) = path.into_inner();
    let mut pages = state.pages_mut()?;
    pages.delete(&page_id, record_id)?;
    Ok(HttpResponse::NoContent().finish())
}
