use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::nav_item::SidebarConfig;
use crate::models::page::PageStore;
use crate::seed;

/// Shared application data handed to every handler through `web::Data`.
pub struct AppState {
    pub app_name: String,
    pub menu: SidebarConfig,
    pages: RwLock<PageStore>,
}

impl AppState {
    pub fn new(app_name: &str, menu: SidebarConfig, pages: PageStore) -> Self {
        AppState {
            app_name: app_name.to_string(),
            menu,
            pages: RwLock::new(pages),
        }
    }

    /// Load menu and pages as configured.
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        let menu = seed::load_menu(config)?;
        let pages = seed::load_pages(config)?;
        Ok(Self::new(&config.app_name, menu, pages))
    }

    pub fn pages(&self) -> Result<RwLockReadGuard<'_, PageStore>, AppError> {
        self.pages.read().map_err(|_| AppError::Lock)
    }

    pub fn pages_mut(&self) -> Result<RwLockWriteGuard<'_, PageStore>, AppError> {
        self.pages.write().map_err(|_| AppError::Lock)
    }
}
