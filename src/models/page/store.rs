use std::collections::HashSet;

use super::types::{Fields, Page, PageSeed, PageSummary};
use super::validate::{normalize_fields, validate_fields};
use crate::errors::AppError;
use crate::models::table_filter::Record;

/// The authoritative record collections, one per report page.
///
/// This is the only place records are mutated; table views borrow
/// snapshots from it.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    /// Build the store from seed pages, validating every seeded row.
    pub fn from_seeds(seeds: Vec<PageSeed>) -> Result<Self, AppError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = Vec::with_capacity(seeds.len());
        for seed in seeds {
            if !seen.insert(seed.id.clone()) {
                return Err(AppError::Config(format!("Duplicate page id '{}'", seed.id)));
            }
            let mut page = Page {
                id: seed.id,
                title: seed.title,
                columns: seed.columns,
                records: Vec::with_capacity(seed.rows.len()),
                next_id: 1,
            };
            for (i, row) in seed.rows.iter().enumerate() {
                let errors = validate_fields(&page.columns, row);
                if !errors.is_empty() {
                    let errors = errors
                        .into_iter()
                        .map(|e| format!("{} row {}: {e}", page.id, i + 1))
                        .collect();
                    return Err(AppError::Validation(errors));
                }
                let id = page.next_id;
                page.next_id += 1;
                page.records.push(Record { id, fields: normalize_fields(&page.columns, row) });
            }
            pages.push(page);
        }
        Ok(PageStore { pages })
    }

    pub fn summaries(&self) -> Vec<PageSummary> {
        self.pages.iter().map(PageSummary::from).collect()
    }

    pub fn find(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    fn find_mut(&mut self, page_id: &str) -> Result<&mut Page, AppError> {
        self.pages.iter_mut().find(|p| p.id == page_id).ok_or(AppError::NotFound)
    }

    pub fn list(&self, page_id: &str) -> Result<&[Record], AppError> {
        self.find(page_id).map(|p| p.records.as_slice()).ok_or(AppError::NotFound)
    }

    pub fn get(&self, page_id: &str, record_id: u64) -> Result<&Record, AppError> {
        self.list(page_id)?
            .iter()
            .find(|r| r.id == record_id)
            .ok_or(AppError::NotFound)
    }

    /// Append a validated row. Returns the stored record.
    pub fn create(&mut self, page_id: &str, fields: &Fields) -> Result<Record, AppError> {
        let page = self.find_mut(page_id)?;
        let errors = validate_fields(&page.columns, fields);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let record = Record {
            id: page.next_id,
            fields: normalize_fields(&page.columns, fields),
        };
        page.next_id += 1;
        page.records.push(record.clone());
        log::info!("Page {page_id}: created record {}", record.id);
        Ok(record)
    }

    /// Replace a row's fields, keeping its id and position.
    pub fn update(&mut self, page_id: &str, record_id: u64, fields: &Fields) -> Result<Record, AppError> {
        let page = self.find_mut(page_id)?;
        let errors = validate_fields(&page.columns, fields);
        let normalized = normalize_fields(&page.columns, fields);
        let record = page
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(AppError::NotFound)?;
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        record.fields = normalized;
        log::info!("Page {page_id}: updated record {record_id}");
        Ok(record.clone())
    }

    pub fn delete(&mut self, page_id: &str, record_id: u64) -> Result<Record, AppError> {
        let page = self.find_mut(page_id)?;
        let pos = page
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or(AppError::NotFound)?;
        let removed = page.records.remove(pos);
        log::info!("Page {page_id}: deleted record {record_id}");
        Ok(removed)
    }
}
