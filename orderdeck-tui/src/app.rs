//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The sync worker communicates via channels; the
//! debounce adapters are polled from the main loop tick.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use orderdeck_core::{
    entries_from, ActionKind, DomainAction, FileOrderStore, OrderEntry, OrderStore, SortError,
    SortableItem, SortableOptions, SortableState,
};

use crate::config::DashboardConfig;
use crate::domain::{PositionEntry, StrategyEntry, StrategyStatus, WatchlistEntry};
use crate::sample_data;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Watchlist,
    Portfolio,
    Strategies,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Watchlist => 0,
            Panel::Portfolio => 1,
            Panel::Strategies => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Watchlist),
            1 => Some(Panel::Portfolio),
            2 => Some(Panel::Strategies),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Watchlist => "Watchlist",
            Panel::Portfolio => "Portfolio",
            Panel::Strategies => "Strategies",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Drag,
    Persist,
    Remote,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Drag => "DRAG",
            ErrorCategory::Persist => "DISK",
            ErrorCategory::Remote => "NET",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
    AddSymbol,
}

/// One reorderable panel: the container plus cursor/scroll presentation
/// state the container itself does not own.
pub struct ListPanelState<T> {
    pub sort: SortableState<T>,
    pub cursor: usize,
    pub scroll_top: usize,
    pub loading: bool,
    pub empty_message: &'static str,
    pub storage_key: &'static str,
}

impl<T: SortableItem + Clone> ListPanelState<T> {
    pub fn new(
        items: Vec<T>,
        options: SortableOptions,
        storage_key: &'static str,
        empty_message: &'static str,
    ) -> Self {
        Self {
            sort: SortableState::new(items, options),
            cursor: 0,
            scroll_top: 0,
            loading: false,
            empty_message,
            storage_key,
        }
    }

    pub fn cursor_id(&self) -> Option<&str> {
        self.sort.visible().get(self.cursor).map(|item| item.id())
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.sort.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Move the cursor; while a drag is in progress the cursor row is the
    /// drop target, so the target follows.
    pub fn move_cursor(&mut self, down: bool) {
        let len = self.sort.len();
        if len == 0 {
            return;
        }
        if down {
            if self.cursor + 1 < len {
                self.cursor += 1;
            }
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
        if self.sort.is_dragging() {
            if let Some(id) = self.cursor_id().map(str::to_string) {
                self.sort.drag_over(&id);
            }
        }
    }

    /// Grab the row at `index`. Returns whether a drag started.
    pub fn grab_at(&mut self, index: usize) -> bool {
        let Some(id) = self.sort.visible().get(index).map(|i| i.id().to_string()) else {
            return false;
        };
        if self.sort.drag_start(&id) {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Point the drag at the row at `index`.
    pub fn hover(&mut self, index: usize) {
        if let Some(id) = self.sort.visible().get(index).map(|i| i.id().to_string()) {
            self.cursor = index;
            self.sort.drag_over(&id);
        }
    }

    /// Drop the tracked drag and leave the cursor on the moved row.
    pub fn drop_now(&mut self, now: Instant) -> Result<Option<Vec<T>>, SortError> {
        let active = self.sort.active_id().map(str::to_string);
        let result = self.sort.drop_current(now);
        if let (Ok(Some(seq)), Some(active)) = (&result, active) {
            if let Some(index) = seq.iter().position(|item| item.id() == active) {
                self.cursor = index;
            }
        }
        result
    }

    /// Keep the cursor row inside the viewport by adjusting the scroll
    /// offset (in rows).
    pub fn ensure_cursor_visible(&mut self, viewport_height: u16) {
        let height = self.sort.options().item_height.max(1) as usize;
        let viewport = viewport_height as usize;
        let cursor_top = self.cursor * height;
        if cursor_top < self.scroll_top {
            self.scroll_top = cursor_top;
        } else if cursor_top + height > self.scroll_top + viewport {
            self.scroll_top = cursor_top + height - viewport;
        }
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub watchlist: ListPanelState<WatchlistEntry>,
    pub portfolio: ListPanelState<PositionEntry>,
    pub strategies: ListPanelState<StrategyEntry>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub symbol_input: String,

    // Persistence
    pub config: DashboardConfig,
    pub store: FileOrderStore,
    #[allow(dead_code)]
    pub state_path: PathBuf,

    // Quote simulation
    pub quote_rng: StdRng,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        store: FileOrderStore,
        state_path: PathBuf,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let watchlist_options = config.sortable_options(config.max_watchlist_items);
        let options = config.sortable_options(None);
        Self {
            active_panel: Panel::Watchlist,
            running: true,
            watchlist: ListPanelState::new(
                sample_data::sample_watchlist(),
                watchlist_options,
                "watchlist",
                "Watchlist is empty — press 'n' to add a symbol",
            ),
            portfolio: ListPanelState::new(
                sample_data::sample_positions(),
                options.clone(),
                "portfolio",
                "No open positions",
            ),
            strategies: ListPanelState::new(
                sample_data::sample_strategies(),
                options,
                "strategies",
                "No strategies configured",
            ),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            symbol_input: String::new(),
            config,
            store,
            state_path,
            quote_rng: StdRng::seed_from_u64(0x0DDECC),
        }
    }

    /// Push an error to the history, capping at 50, and surface it on the
    /// status line.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.record_error(category, message.clone(), context);
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Record an error quietly — history only, no status line. Persistence
    /// failures use this path: logged, never surfaced.
    pub fn record_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Restore stored orders at boot. Local records apply immediately via
    /// the debounced path; keys with no local record fall back to a remote
    /// fetch when an endpoint is configured.
    pub fn restore_orders(&mut self, now: Instant) {
        if !self.config.persist_order {
            return;
        }
        for key in ["watchlist", "portfolio", "strategies"] {
            match self.store.load(key) {
                Ok(Some(entries)) => self.apply_order(key, &entries, now),
                Ok(None) => {
                    if self.config.remote_endpoint.is_some() {
                        let _ = self.worker_tx.send(WorkerCommand::FetchOrder {
                            key: key.to_string(),
                        });
                    }
                }
                Err(e) => {
                    self.record_error(ErrorCategory::Persist, e.to_string(), key.to_string());
                }
            }
        }
    }

    /// Apply an ordering record to the panel that owns `key`.
    pub fn apply_order(&mut self, key: &str, entries: &[OrderEntry], now: Instant) {
        match key {
            "watchlist" => self.watchlist.sort.apply_order(entries, now),
            "portfolio" => self.portfolio.sort.apply_order(entries, now),
            "strategies" => self.strategies.sort.apply_order(entries, now),
            _ => {}
        }
    }

    /// The items-change path for a committed sequence: local save first,
    /// then a best-effort remote push through the worker.
    pub fn persist_entries(&mut self, key: &'static str, entries: Vec<OrderEntry>) {
        if let Err(e) = self.store.save(key, &entries) {
            self.record_error(ErrorCategory::Persist, e.to_string(), key.to_string());
        }
        if self.config.remote_endpoint.is_some() {
            let _ = self.worker_tx.send(WorkerCommand::PushOrder {
                key: key.to_string(),
                entries,
            });
        }
    }

    /// Collect due commits from every panel and run them through the
    /// items-change path. Called on each event-loop tick.
    pub fn pump_commits(&mut self, now: Instant) {
        if let Some(seq) = self.watchlist.sort.poll_commit(now) {
            if self.watchlist.sort.options().persist_order {
                self.persist_entries("watchlist", entries_from(&seq));
            }
        }
        if let Some(seq) = self.portfolio.sort.poll_commit(now) {
            if self.portfolio.sort.options().persist_order {
                self.persist_entries("portfolio", entries_from(&seq));
            }
        }
        if let Some(seq) = self.strategies.sort.poll_commit(now) {
            if self.strategies.sort.options().persist_order {
                self.persist_entries("strategies", entries_from(&seq));
            }
        }
    }

    /// Translate a tagged domain action into its domain mutation and
    /// resynchronize the affected container to the new canonical data.
    pub fn apply_action(&mut self, action: DomainAction) {
        match action.kind {
            ActionKind::RemoveSymbol => {
                let mut items = self.watchlist.sort.visible().to_vec();
                items.retain(|entry| entry.symbol != action.item_id);
                self.watchlist.sort.sync_external(items);
                self.watchlist.clamp_cursor();
                self.set_status(format!("Removed {}", action.item_id));
            }
            ActionKind::ToggleAlert => {
                let mut items = self.watchlist.sort.visible().to_vec();
                let mut toggled = None;
                for entry in items.iter_mut() {
                    if entry.symbol == action.item_id {
                        entry.alert = !entry.alert;
                        toggled = Some(entry.alert);
                    }
                }
                self.watchlist.sort.sync_external(items);
                if let Some(on) = toggled {
                    self.set_status(format!(
                        "Alert {} for {}",
                        if on { "armed" } else { "cleared" },
                        action.item_id
                    ));
                }
            }
            ActionKind::ClosePosition => {
                let mut items = self.portfolio.sort.visible().to_vec();
                items.retain(|position| position.symbol != action.item_id);
                self.portfolio.sort.sync_external(items);
                self.portfolio.clamp_cursor();
                self.set_status(format!("Closed {}", action.item_id));
            }
            ActionKind::StartStrategy
            | ActionKind::PauseStrategy
            | ActionKind::StopStrategy => {
                let status = match action.kind {
                    ActionKind::StartStrategy => StrategyStatus::Running,
                    ActionKind::PauseStrategy => StrategyStatus::Paused,
                    _ => StrategyStatus::Stopped,
                };
                let mut items = self.strategies.sort.visible().to_vec();
                let mut name = None;
                for strategy in items.iter_mut() {
                    if strategy.id == action.item_id {
                        strategy.status = status;
                        name = Some(strategy.name.clone());
                    }
                }
                self.strategies.sort.sync_external(items);
                if let Some(name) = name {
                    self.set_status(format!("{name}: {}", status.label()));
                }
            }
        }
    }

    /// Advance the quote simulation. Skipped while any panel has a drag or
    /// a pending commit, so the resync never clobbers in-flight reorders.
    pub fn tick_quotes(&mut self) {
        let busy = self.watchlist.sort.is_dragging()
            || self.watchlist.sort.has_pending_commit()
            || self.portfolio.sort.is_dragging()
            || self.portfolio.sort.has_pending_commit();
        if busy {
            return;
        }
        let mut watchlist = self.watchlist.sort.visible().to_vec();
        let mut positions = self.portfolio.sort.visible().to_vec();
        sample_data::tick_quotes(&mut watchlist, &mut positions, &mut self.quote_rng);
        self.watchlist.sort.sync_external(watchlist);
        self.portfolio.sort.sync_external(positions);
    }

    /// Add a symbol typed into the add-symbol prompt.
    pub fn add_symbol(&mut self, symbol: &str) {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return;
        }
        let mut items = self.watchlist.sort.visible().to_vec();
        if items.iter().any(|entry| entry.symbol == symbol) {
            self.set_warning(format!("{symbol} is already on the watchlist"));
            return;
        }
        items.push(sample_data::new_watchlist_entry(&symbol));
        self.watchlist.sort.sync_external(items);
        self.set_status(format!("Added {symbol}"));
    }
}
