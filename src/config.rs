//! Application settings.
//!
//! Settings live in a JSON file. The path comes from `FOLIO_CONFIG`, falling
//! back to `folio.json` in the working directory. A missing file means
//! defaults; a malformed one is reported at startup.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::pagination::{
    PaginationConfig, DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAX_VISIBLE_PAGES, MAX_ITEMS_PER_PAGE,
};

pub const CONFIG_ENV: &str = "FOLIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "folio.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub items_per_page: u64,
    pub max_items_per_page: u64,
    pub max_visible_pages: usize,
    /// Persisted ledger; the demo data set is used when unset or missing.
    pub data_file: Option<PathBuf>,
    pub log_dir: PathBuf,
    /// Artificial latency of the in-memory source, in milliseconds.
    pub fetch_latency_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_items_per_page: MAX_ITEMS_PER_PAGE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            data_file: None,
            log_dir: PathBuf::from("./logs"),
            fetch_latency_ms: 0,
        }
    }
}

impl Settings {
    /// Loads settings from `FOLIO_CONFIG` or `folio.json`.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Loads settings from `path`, using defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&raw)
            .wrap_err_with(|| format!("parsing settings in {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .wrap_err_with(|| format!("writing settings to {}", path.display()))?;
        Ok(())
    }

    /// Pagination bounds for listing views. Out of range values are clamped.
    pub fn pagination_config(&self) -> PaginationConfig {
        PaginationConfig {
            min_items_per_page: 1,
            max_items_per_page: self.max_items_per_page,
            default_items_per_page: self.items_per_page,
            max_visible_pages: self.max_visible_pages,
        }
        .normalized()
    }
}
