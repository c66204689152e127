//! Dashboard configuration — TOML file in the orderdeck config directory.
//!
//! Missing or corrupt files fall back to defaults; a broken config never
//! stops the dashboard from starting.

use std::path::{Path, PathBuf};

use orderdeck_core::{AnimationPreset, SortableOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Optional remote order endpoint (`PUT/GET {base}/orders/{key}`).
    pub remote_endpoint: Option<String>,
    /// Animation preset name: smooth, snappy, gentle, instant.
    pub animation_preset: String,
    pub enable_virtualization: bool,
    pub enable_multi_select: bool,
    pub persist_order: bool,
    /// Uniform row height in terminal rows.
    pub item_height: u16,
    /// Display-only cap indicator for the watchlist. Does not truncate data.
    pub max_watchlist_items: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: None,
            animation_preset: "smooth".to_string(),
            enable_virtualization: true,
            enable_multi_select: true,
            persist_order: true,
            item_height: 1,
            max_watchlist_items: None,
        }
    }
}

impl DashboardConfig {
    /// Load from disk. Returns defaults if the file is missing or corrupt.
    pub fn load(path: &Path) -> DashboardConfig {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => DashboardConfig::default(),
        }
    }

    /// Container options derived from this config.
    pub fn sortable_options(&self, max_items: Option<usize>) -> SortableOptions {
        SortableOptions {
            multi_select: self.enable_multi_select,
            virtualization: self.enable_virtualization,
            max_items,
            persist_order: self.persist_order,
            animation: AnimationPreset::from_name(&self.animation_preset).unwrap_or_default(),
            item_height: self.item_height.max(1),
        }
    }
}

/// Root of orderdeck's config/state files.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orderdeck")
}
