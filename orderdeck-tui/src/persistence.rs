//! App state persistence — JSON save/load across restarts.
//!
//! Order records live in the order store; this file only remembers the
//! presentation state worth carrying over.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
    /// Symbols with an armed alert.
    pub alert_symbols: Vec<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Watchlist,
            welcome_dismissed: false,
            alert_symbols: Vec::new(),
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
        alert_symbols: app
            .watchlist
            .sort
            .visible()
            .iter()
            .filter(|entry| entry.alert)
            .map(|entry| entry.symbol.clone())
            .collect(),
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    let mut items = app.watchlist.sort.visible().to_vec();
    for entry in items.iter_mut() {
        entry.alert = state.alert_symbols.contains(&entry.symbol);
    }
    app.watchlist.sort.sync_external(items);
}
