//! Input dispatch — overlays first, then global keys, then panel handlers.
//!
//! Reordering affordances:
//! - Keyboard: Space/Enter grabs the cursor row, j/k move the drop target,
//!   Space/Enter drops, Esc cancels.
//! - Mouse: button-down on a row's grab handle starts the drag, drag motion
//!   moves the target, button-up drops. While a drag is active the list
//!   ignores further presses, so a second drag cannot start.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use orderdeck_core::{virtualize, ActionKind, DomainAction, SortError, SortableItem};

use crate::app::{AppState, ErrorCategory, ListPanelState, Overlay, Panel};
use crate::domain::StrategyStatus;

/// Columns occupied by the grab handle at the left edge of each row.
pub const HANDLE_WIDTH: u16 = 2;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::AddSymbol => {
            handle_add_symbol_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Watchlist; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Portfolio; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Strategies; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Watchlist => handle_watchlist_key(app, key),
        Panel::Portfolio => handle_portfolio_key(app, key),
        Panel::Strategies => handle_strategies_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_add_symbol_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.symbol_input.clear();
        }
        KeyCode::Enter => {
            let symbol = app.symbol_input.clone();
            app.add_symbol(&symbol);
            app.symbol_input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.symbol_input.pop();
        }
        KeyCode::Char(c) => {
            app.symbol_input.push(c);
        }
        _ => {}
    }
}

/// Shared list navigation: cursor moves, grab/drop, cancel. Returns true if
/// the key was consumed.
fn handle_list_key<T: SortableItem + Clone>(panel: &mut ListPanelState<T>, key: KeyEvent) -> Result<bool, SortError> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            panel.move_cursor(true);
            Ok(true)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            panel.move_cursor(false);
            Ok(true)
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if panel.sort.is_dragging() {
                panel.drop_now(Instant::now())?;
            } else {
                panel.grab_at(panel.cursor);
            }
            Ok(true)
        }
        KeyCode::Esc => {
            if panel.sort.is_dragging() {
                panel.sort.drag_cancel();
                Ok(true)
            } else {
                Ok(false)
            }
        }
        KeyCode::Char('v') => {
            if let Some(id) = panel.cursor_id().map(str::to_string) {
                panel.sort.toggle_select(&id);
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn handle_watchlist_key(app: &mut AppState, key: KeyEvent) {
    match handle_list_key(&mut app.watchlist, key) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            app.push_error(ErrorCategory::Drag, e.to_string(), "watchlist".into());
            return;
        }
    }

    match key.code {
        KeyCode::Char('a') => {
            if let Some(id) = app.watchlist.cursor_id().map(str::to_string) {
                app.apply_action(DomainAction::new(ActionKind::ToggleAlert, id));
            }
        }
        KeyCode::Char('d') | KeyCode::Char('x') => {
            if let Some(id) = app.watchlist.cursor_id().map(str::to_string) {
                app.apply_action(DomainAction::new(ActionKind::RemoveSymbol, id));
            }
        }
        KeyCode::Char('n') => {
            app.overlay = Overlay::AddSymbol;
            app.symbol_input.clear();
        }
        _ => {}
    }
}

fn handle_portfolio_key(app: &mut AppState, key: KeyEvent) {
    match handle_list_key(&mut app.portfolio, key) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            app.push_error(ErrorCategory::Drag, e.to_string(), "portfolio".into());
            return;
        }
    }

    if let KeyCode::Char('x') | KeyCode::Char('c') = key.code {
        if let Some(id) = app.portfolio.cursor_id().map(str::to_string) {
            app.apply_action(DomainAction::new(ActionKind::ClosePosition, id));
        }
    }
}

fn handle_strategies_key(app: &mut AppState, key: KeyEvent) {
    match handle_list_key(&mut app.strategies, key) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            app.push_error(ErrorCategory::Drag, e.to_string(), "strategies".into());
            return;
        }
    }

    match key.code {
        KeyCode::Char('s') => {
            // Toggle: running pauses, anything else starts.
            let target = app.strategies.cursor_id().and_then(|id| {
                app.strategies
                    .sort
                    .visible()
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| (id.to_string(), s.status))
            });
            if let Some((id, status)) = target {
                let kind = if status == StrategyStatus::Running {
                    ActionKind::PauseStrategy
                } else {
                    ActionKind::StartStrategy
                };
                app.apply_action(DomainAction::new(kind, id));
            }
        }
        KeyCode::Char('S') => {
            if let Some(id) = app.strategies.cursor_id().map(str::to_string) {
                app.apply_action(DomainAction::new(ActionKind::StopStrategy, id));
            }
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}

/// Resolve a mouse position to an item index. `scroll_top` is in rows; rows
/// map to indices through the uniform item height.
pub fn row_index_at(
    list: Rect,
    scroll_top: usize,
    item_height: u16,
    item_count: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    if column < list.x || column >= list.x + list.width {
        return None;
    }
    if row < list.y || row >= list.y + list.height {
        return None;
    }
    let absolute = scroll_top + (row - list.y) as usize;
    let index = absolute / item_height.max(1) as usize;
    (index < item_count).then_some(index)
}

/// Handle a mouse event against the active panel's list viewport.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent, frame: Rect) {
    if app.overlay != Overlay::None {
        return;
    }
    let list = crate::ui::list_rect(frame);
    let result = match app.active_panel {
        Panel::Watchlist => mouse_on_list(&mut app.watchlist, mouse, list),
        Panel::Portfolio => mouse_on_list(&mut app.portfolio, mouse, list),
        Panel::Strategies => mouse_on_list(&mut app.strategies, mouse, list),
        Panel::Help => Ok(()),
    };
    if let Err(e) = result {
        let context = app.active_panel.label().to_lowercase();
        app.push_error(ErrorCategory::Drag, e.to_string(), context);
    }
}

fn mouse_on_list<T: SortableItem + Clone>(
    panel: &mut ListPanelState<T>,
    mouse: MouseEvent,
    list: Rect,
) -> Result<(), SortError> {
    let item_height = panel.sort.options().item_height;
    let count = panel.sort.len();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // One active drag system-wide: presses are inert mid-drag.
            if panel.sort.is_dragging() {
                return Ok(());
            }
            if let Some(index) = row_index_at(
                list,
                panel.scroll_top,
                item_height,
                count,
                mouse.column,
                mouse.row,
            ) {
                if mouse.column < list.x + HANDLE_WIDTH {
                    panel.grab_at(index);
                } else {
                    panel.cursor = index;
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if panel.sort.is_dragging() {
                if let Some(index) = row_index_at(
                    list,
                    panel.scroll_top,
                    item_height,
                    count,
                    mouse.column,
                    mouse.row,
                ) {
                    panel.hover(index);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if panel.sort.is_dragging() {
                panel.drop_now(Instant::now())?;
            }
        }
        MouseEventKind::ScrollDown => {
            let max = virtualize::total_height(count, item_height)
                .saturating_sub(list.height as usize);
            panel.scroll_top = (panel.scroll_top + 1).min(max);
        }
        MouseEventKind::ScrollUp => {
            panel.scroll_top = panel.scroll_top.saturating_sub(1);
        }
        _ => {}
    }
    Ok(())
}

/// Key bindings help text.
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q", "Quit"),
        ("1-4 / Tab", "Switch panel"),
        ("↑/k, ↓/j", "Move cursor / drop target"),
        ("Space/Enter", "Grab row, drop row"),
        ("Esc", "Cancel drag"),
        ("mouse ≡ drag", "Reorder by pointer"),
        ("v", "Toggle selection"),
        ("a", "Toggle alert (watchlist)"),
        ("d/x", "Remove symbol (watchlist)"),
        ("n", "Add symbol (watchlist)"),
        ("x/c", "Close position (portfolio)"),
        ("s / S", "Start-pause / stop strategy"),
        ("e", "Error history (from Help)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app;

    fn press(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_on_q() {
        let (mut app, _dir) = test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press('q'));
        assert!(!app.running);
    }

    #[test]
    fn digits_switch_panels() {
        let (mut app, _dir) = test_app();
        handle_key(&mut app, press('2'));
        assert_eq!(app.active_panel, Panel::Portfolio);
        handle_key(&mut app, KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.active_panel, Panel::Strategies);
        handle_key(&mut app, KeyEvent::from(KeyCode::BackTab));
        assert_eq!(app.active_panel, Panel::Portfolio);
    }

    #[test]
    fn keyboard_grab_move_drop_reorders() {
        let (mut app, _dir) = test_app();
        let first = app.watchlist.sort.visible()[0].symbol.clone();
        let second = app.watchlist.sort.visible()[1].symbol.clone();

        handle_key(&mut app, press(' ')); // grab row 0
        assert!(app.watchlist.sort.is_dragging());
        handle_key(&mut app, press('j')); // target row 1
        handle_key(&mut app, press(' ')); // drop

        assert!(!app.watchlist.sort.is_dragging());
        let visible = app.watchlist.sort.visible();
        assert_eq!(visible[0].symbol, second);
        assert_eq!(visible[1].symbol, first);
        // Cursor follows the moved row.
        assert_eq!(app.watchlist.cursor, 1);
    }

    #[test]
    fn esc_cancels_a_keyboard_drag() {
        let (mut app, _dir) = test_app();
        let order_before: Vec<String> = app
            .watchlist
            .sort
            .visible()
            .iter()
            .map(|e| e.symbol.clone())
            .collect();

        handle_key(&mut app, press(' '));
        handle_key(&mut app, press('j'));
        handle_key(&mut app, KeyEvent::from(KeyCode::Esc));

        assert!(!app.watchlist.sort.is_dragging());
        let order_after: Vec<String> = app
            .watchlist
            .sort
            .visible()
            .iter()
            .map(|e| e.symbol.clone())
            .collect();
        assert_eq!(order_before, order_after);
        assert!(!app.watchlist.sort.has_pending_commit());
    }

    #[test]
    fn selection_via_v_key() {
        let (mut app, _dir) = test_app();
        let id = app.watchlist.sort.visible()[0].symbol.clone();
        handle_key(&mut app, press('v'));
        assert!(app.watchlist.sort.is_selected(&id));
        handle_key(&mut app, press('v'));
        assert!(!app.watchlist.sort.is_selected(&id));
    }

    #[test]
    fn alert_key_dispatches_domain_action() {
        let (mut app, _dir) = test_app();
        let before = app.watchlist.sort.visible()[0].alert;
        handle_key(&mut app, press('a'));
        assert_ne!(app.watchlist.sort.visible()[0].alert, before);
    }

    #[test]
    fn add_symbol_overlay_flow() {
        let (mut app, _dir) = test_app();
        let before = app.watchlist.sort.len();

        handle_key(&mut app, press('n'));
        assert_eq!(app.overlay, Overlay::AddSymbol);
        for c in "coin".chars() {
            handle_key(&mut app, press(c));
        }
        handle_key(&mut app, KeyEvent::from(KeyCode::Enter));

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.watchlist.sort.len(), before + 1);
        assert!(app
            .watchlist
            .sort
            .visible()
            .iter()
            .any(|e| e.symbol == "COIN"));
    }

    #[test]
    fn strategy_start_pause_toggle() {
        let (mut app, _dir) = test_app();
        app.active_panel = Panel::Strategies;
        // Row 0 is Running in the sample set.
        handle_key(&mut app, press('s'));
        assert_eq!(
            app.strategies.sort.visible()[0].status,
            StrategyStatus::Paused
        );
        handle_key(&mut app, press('s'));
        assert_eq!(
            app.strategies.sort.visible()[0].status,
            StrategyStatus::Running
        );
    }

    #[test]
    fn row_index_hit_testing() {
        let list = Rect::new(1, 3, 40, 10);
        assert_eq!(row_index_at(list, 0, 1, 8, 5, 3), Some(0));
        assert_eq!(row_index_at(list, 0, 1, 8, 5, 7), Some(4));
        // Scrolled by 2 rows.
        assert_eq!(row_index_at(list, 2, 1, 8, 5, 3), Some(2));
        // Two-row items.
        assert_eq!(row_index_at(list, 0, 2, 8, 5, 6), Some(1));
        // Outside the viewport or past the data.
        assert_eq!(row_index_at(list, 0, 1, 8, 0, 3), None);
        assert_eq!(row_index_at(list, 0, 1, 8, 5, 13), None);
        assert_eq!(row_index_at(list, 0, 1, 3, 5, 8), None);
    }

    #[test]
    fn mouse_drag_reorders_via_handle() {
        let (mut app, _dir) = test_app();
        let frame = Rect::new(0, 0, 80, 24);
        let list = crate::ui::list_rect(frame);
        let first = app.watchlist.sort.visible()[0].symbol.clone();

        // Down on the handle of row 0, drag to row 2, release.
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), list.x, list.y),
            frame,
        );
        assert!(app.watchlist.sort.is_dragging());
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Drag(MouseButton::Left), list.x, list.y + 2),
            frame,
        );
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Up(MouseButton::Left), list.x, list.y + 2),
            frame,
        );

        assert!(!app.watchlist.sort.is_dragging());
        assert_eq!(app.watchlist.sort.visible()[2].symbol, first);
    }

    #[test]
    fn mouse_down_off_handle_only_moves_cursor() {
        let (mut app, _dir) = test_app();
        let frame = Rect::new(0, 0, 80, 24);
        let list = crate::ui::list_rect(frame);

        handle_mouse(
            &mut app,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                list.x + HANDLE_WIDTH + 4,
                list.y + 3,
            ),
            frame,
        );
        assert!(!app.watchlist.sort.is_dragging());
        assert_eq!(app.watchlist.cursor, 3);
    }

    #[test]
    fn presses_are_inert_while_dragging() {
        let (mut app, _dir) = test_app();
        let frame = Rect::new(0, 0, 80, 24);
        let list = crate::ui::list_rect(frame);

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), list.x, list.y),
            frame,
        );
        let active = app.watchlist.sort.active_id().unwrap().to_string();

        // A second press cannot start a nested drag.
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), list.x, list.y + 4),
            frame,
        );
        assert_eq!(app.watchlist.sort.active_id(), Some(active.as_str()));
    }

    #[test]
    fn help_bindings_are_listed() {
        let bindings = key_bindings_help();
        assert!(!bindings.is_empty());
        assert_eq!(bindings[0].0, "q");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Hit-testing inverts the row layout: a screen row maps back to
            /// the index whose rows cover it, or to nothing past the data.
            #[test]
            fn hit_test_inverts_row_layout(
                count in 1usize..200,
                scroll in 0usize..100,
                height in 1u16..4,
                screen_row in 0u16..19,
            ) {
                let list = Rect::new(1, 3, 40, 19);
                let absolute = scroll + screen_row as usize;
                let expected = absolute / height as usize;

                let got = row_index_at(list, scroll, height, count, 5, list.y + screen_row);
                if expected < count {
                    prop_assert_eq!(got, Some(expected));
                } else {
                    prop_assert_eq!(got, None);
                }
            }
        }
    }
}
