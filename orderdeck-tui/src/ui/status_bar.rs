//! Bottom status bar — panel hints, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Watchlist 2:Portfolio 3:Strategies 4:Help",
        theme::muted(),
    ));

    if app.watchlist.sort.is_dragging()
        || app.portfolio.sort.is_dragging()
        || app.strategies.sort.is_dragging()
    {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("DRAG", theme::accent_bold()));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}
