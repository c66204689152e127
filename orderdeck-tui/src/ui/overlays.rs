//! Overlays — welcome screen, error history, add-symbol prompt.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let rect = centered_rect(60, 50, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Welcome to OrderDeck ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Drag rows to arrange your dashboard.",
            theme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Keyboard: Space grabs, j/k move, Space drops, Esc cancels.",
            theme::text_secondary(),
        )),
        Line::from(Span::styled(
            "  Mouse: drag the ≡ handle.",
            theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Order is saved locally and restored next time.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("  Press any key to start.", theme::accent())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(80, 70, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" Errors ({}) — j/k scroll, Esc close ", app.error_history.len()));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    if app.error_history.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled("No errors recorded.", theme::muted())));
        f.render_widget(para, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for record in app.error_history.iter().skip(app.error_scroll) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", record.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{:<4}] ", record.category.label()), theme::warning()),
            Span::styled(record.message.clone(), theme::text()),
            Span::styled(
                if record.context.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", record.context)
                },
                theme::text_secondary(),
            ),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_add_symbol(f: &mut Frame, area: Rect, input: &str) {
    let rect = centered_rect(40, 20, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Add symbol — Enter confirms, Esc cancels ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let para = Paragraph::new(Line::from(vec![
        Span::styled("  > ", theme::accent()),
        Span::styled(input.to_uppercase(), theme::text()),
        Span::styled("_", theme::accent_bold()),
    ]));
    f.render_widget(para, inner);
}
