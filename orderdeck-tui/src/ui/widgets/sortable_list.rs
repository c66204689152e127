//! The generic reorderable list renderer.
//!
//! Takes a panel's container state and a per-row line builder, computes the
//! window for the current scroll position, and draws rows with their drag
//! affordances: grab handle, dragged-row dimming, drop-target marker,
//! selection badges, dimmed disabled rows, and the display-only cap
//! indicator. Loading and empty states replace the list entirely.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use orderdeck_core::{virtualize, SortableItem};

use crate::app::ListPanelState;
use crate::theme;

/// Render one reorderable list into `area`.
pub fn render<T, F>(f: &mut Frame, area: Rect, panel: &ListPanelState<T>, row_line: F)
where
    T: SortableItem + Clone,
    F: Fn(&T, usize) -> Line<'static>,
{
    if panel.loading {
        let para = Paragraph::new(Line::from(Span::styled("Loading…", theme::muted())));
        f.render_widget(para, area);
        return;
    }
    if panel.sort.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            panel.empty_message,
            theme::muted(),
        )));
        f.render_widget(para, area);
        return;
    }

    let item_height = panel.sort.options().item_height.max(1);
    let window = panel.sort.window(area.height, panel.scroll_top);
    let items = panel.sort.visible();
    let active_id = panel.sort.active_id().map(str::to_string);
    let target_id = panel.sort.drag_target().map(str::to_string);

    let mut lines: Vec<Line> = Vec::with_capacity(window.len() * item_height as usize);
    for index in window.indices() {
        let item = &items[index];
        let id = item.id();

        let mut spans: Vec<Span> = Vec::new();
        if item.disabled() {
            spans.push(Span::styled("  ", theme::disabled_row()));
        } else if target_id.as_deref() == Some(id) {
            spans.push(Span::styled("▸ ", theme::drop_target()));
        } else {
            spans.push(Span::styled("≡ ", theme::muted()));
        }
        if panel.sort.is_selected(id) {
            spans.push(Span::styled("▌", theme::selection_badge()));
        } else {
            spans.push(Span::raw(" "));
        }

        let body = row_line(item, index);
        spans.extend(body.spans);

        let mut line = Line::from(spans);
        if item.disabled() {
            line.style = theme::disabled_row();
        } else if active_id.as_deref() == Some(id) {
            // The grabbed row: reduced opacity, keeps its slot until dropped.
            line.style = theme::drag_active();
        } else if target_id.as_deref() == Some(id) {
            line.style = theme::drop_target();
        } else if index == panel.cursor {
            line.style = theme::cursor_row();
        }

        lines.push(line);
        for _ in 1..item_height {
            lines.push(Line::from(""));
        }
    }

    // The window starts at an absolute row offset; scroll the remainder so
    // screen rows line up with `scroll_top + screen_y`.
    let skip = panel
        .scroll_top
        .saturating_sub(virtualize::row_offset(window.start, item_height));
    let para = Paragraph::new(lines).scroll((skip as u16, 0));
    f.render_widget(para, area);

    // Display-only cap indicator; the data is never truncated.
    if let Some(max) = panel.sort.options().max_items {
        let count = panel.sort.len();
        if count > max && area.height > 0 {
            let footer = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            let para = Paragraph::new(Line::from(Span::styled(
                format!(" {count} rows — display cap {max} exceeded "),
                theme::warning(),
            )));
            f.render_widget(para, footer);
        }
    }
}
