//! Test helpers — AppState construction without a terminal.

use std::sync::mpsc;

use orderdeck_core::FileOrderStore;
use tempfile::TempDir;

use crate::app::AppState;
use crate::config::DashboardConfig;

/// An app over a temp-dir store with dangling worker channels. The TempDir
/// must outlive the app.
pub fn test_app() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let (cmd_tx, _cmd_rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();

    let app = AppState::new(
        DashboardConfig::default(),
        FileOrderStore::new(dir.path().join("orders")),
        dir.path().join("state.json"),
        cmd_tx,
        resp_rx,
    );
    (app, dir)
}
