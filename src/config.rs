use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "Fuel ERP";

/// Runtime settings, read from the environment (and `.env` via dotenvy).
///
/// - `FUELERP_BIND`: listen address
/// - `FUELERP_APP_NAME`: name reported by the API
/// - `FUELERP_MENU_PATH`: sidebar JSON replacing the embedded seed
/// - `FUELERP_PAGES_PATH`: report pages JSON replacing the embedded seed
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub app_name: String,
    pub menu_path: Option<PathBuf>,
    pub pages_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            menu_path: None,
            pages_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();
        AppConfig {
            bind: get("FUELERP_BIND").unwrap_or(defaults.bind),
            app_name: get("FUELERP_APP_NAME").unwrap_or(defaults.app_name),
            menu_path: get("FUELERP_MENU_PATH").map(PathBuf::from),
            pages_path: get("FUELERP_PAGES_PATH").map(PathBuf::from),
        }
    }
}
