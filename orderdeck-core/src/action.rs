//! The single domain-action channel.
//!
//! Domain panels dispatch one tagged action instead of a spread of
//! per-callback props, keeping the generic container decoupled from domain
//! semantics. Actions fire synchronously from user interaction and are
//! independent of the reorder pipeline.

/// What the user asked a row to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    RemoveSymbol,
    ToggleAlert,
    ClosePosition,
    StartStrategy,
    PauseStrategy,
    StopStrategy,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::RemoveSymbol => "remove",
            ActionKind::ToggleAlert => "alert",
            ActionKind::ClosePosition => "close",
            ActionKind::StartStrategy => "start",
            ActionKind::PauseStrategy => "pause",
            ActionKind::StopStrategy => "stop",
        }
    }
}

/// A tagged action targeting one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAction {
    pub kind: ActionKind,
    pub item_id: String,
}

impl DomainAction {
    pub fn new(kind: ActionKind, item_id: impl Into<String>) -> Self {
        Self {
            kind,
            item_id: item_id.into(),
        }
    }
}
