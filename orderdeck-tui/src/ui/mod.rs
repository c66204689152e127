//! Top-level UI layout — single-panel frame with status bar and overlays.

pub mod help_panel;
pub mod overlays;
pub mod portfolio_panel;
pub mod status_bar;
pub mod strategy_panel;
pub mod watchlist_panel;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Header rows every list panel renders above its rows (summary + columns).
pub const HEADER_ROWS: u16 = 2;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    // Overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::AddSymbol => overlays::render_add_symbol(f, main_area, &app.symbol_input),
        Overlay::None => {}
    }
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let is_active = true; // always active since we show only one

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Watchlist => watchlist_panel::render(f, inner, app),
        Panel::Portfolio => portfolio_panel::render(f, inner, app),
        Panel::Strategies => strategy_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// The list viewport of the active panel for a given frame size. Input and
/// rendering share this so mouse hit-testing matches what is drawn.
pub fn list_rect(frame_area: Rect) -> Rect {
    let main_height = frame_area.height.saturating_sub(1); // status bar
    Rect {
        x: frame_area.x + 1,
        y: frame_area.y + 1 + HEADER_ROWS,
        width: frame_area.width.saturating_sub(2),
        height: main_height.saturating_sub(2 + HEADER_ROWS),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}.")
    }
}
