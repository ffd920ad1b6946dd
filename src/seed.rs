use std::path::Path;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::nav_item::SidebarConfig;
use crate::models::page::{PageStore, PagesFile};

pub const MENU_SEED: &str = include_str!("../data/seed/menu.json");
pub const PAGES_SEED: &str = include_str!("../data/seed/pages.json");

/// Read an override file, or fall back to the embedded seed.
fn read_source(path: Option<&Path>, embedded: &'static str, label: &str) -> Result<String, AppError> {
    match path {
        Some(p) => {
            log::info!("Loading {label} from {}", p.display());
            std::fs::read_to_string(p)
                .map_err(|e| AppError::Config(format!("Cannot read {label} file {}: {e}", p.display())))
        }
        None => Ok(embedded.to_string()),
    }
}

/// Load and validate the sidebar definition.
pub fn load_menu(config: &AppConfig) -> Result<SidebarConfig, AppError> {
    let json = read_source(config.menu_path.as_deref(), MENU_SEED, "menu")?;
    let menu = SidebarConfig::from_json(&json)?;
    log::info!("Seed menu: {} top-level entries", menu.entries.len());
    Ok(menu)
}

/// Parse report pages and their starting rows into a page store.
pub fn parse_pages(json: &str) -> Result<PageStore, AppError> {
    let file: PagesFile = serde_json::from_str(json)?;
    PageStore::from_seeds(file.pages)
}

pub fn load_pages(config: &AppConfig) -> Result<PageStore, AppError> {
    let json = read_source(config.pages_path.as_deref(), PAGES_SEED, "pages")?;
    let store = parse_pages(&json)?;
    for page in store.summaries() {
        log::info!("Seed page {}: {} records", page.id, page.record_count);
    }
    Ok(store)
}
