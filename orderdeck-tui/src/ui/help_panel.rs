//! Panel 4 — Help: key bindings and pointers.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::input::key_bindings_help;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "OrderDeck — reorderable trading dashboard",
        theme::accent_bold(),
    )));
    lines.push(Line::from(""));

    for (keys, description) in key_bindings_help() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<14} "), theme::accent()),
            Span::styled(description, theme::text_secondary()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  Orders persist under {} and sync to a remote endpoint when configured.",
            app.store.dir().display()
        ),
        theme::muted(),
    )));
    if !app.error_history.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {} recorded errors — press 'e' to review.", app.error_history.len()),
            theme::warning(),
        )));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
