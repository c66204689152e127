//! Panel 2 — Portfolio: reorderable open positions with P&L summary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::domain::{portfolio_summary, PositionEntry};
use crate::theme;
use crate::ui::{self, HEADER_ROWS};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.portfolio;
    let summary = portfolio_summary(list.sort.visible());
    let pnl_pct = if summary.cost_basis == 0.0 {
        0.0
    } else {
        summary.total_pnl / summary.cost_basis * 100.0
    };

    let header = Line::from(vec![
        Span::styled(
            format!("Value ${:.2}", summary.total_value),
            theme::accent(),
        ),
        Span::styled(" | P&L ", theme::muted()),
        Span::styled(
            format!("{:+.2} ({pnl_pct:+.2}%)", summary.total_pnl),
            theme::pnl_style(summary.total_pnl),
        ),
        Span::styled(
            format!(" | {} positions  [Space]grab/drop [x]close", list.sort.len()),
            theme::muted(),
        ),
    ]);

    let columns = Line::from(Span::styled(
        format!(
            "   {:<6} {:>8} {:>10} {:>10} {:>12} {:>10}",
            "Sym", "Qty", "Entry", "Last", "Value", "P&L"
        ),
        theme::accent_bold(),
    ));

    let para = Paragraph::new(vec![header, columns]);
    f.render_widget(
        para,
        Rect {
            height: HEADER_ROWS.min(area.height),
            ..area
        },
    );

    let list_area = Rect {
        x: area.x,
        y: area.y + HEADER_ROWS,
        width: area.width,
        height: area.height.saturating_sub(HEADER_ROWS),
    };

    ui::widgets::sortable_list::render(f, list_area, list, |position: &PositionEntry, _index| {
        Line::from(vec![
            Span::styled(format!("{:<6} ", position.symbol), theme::text()),
            Span::styled(format!("{:>8.0} ", position.quantity), theme::text_secondary()),
            Span::styled(format!("{:>10.2} ", position.entry_price), theme::text_secondary()),
            Span::styled(format!("{:>10.2} ", position.last), theme::text()),
            Span::styled(format!("{:>12.2} ", position.market_value()), theme::text()),
            Span::styled(
                format!("{:>+10.2}", position.pnl()),
                theme::pnl_style(position.pnl()),
            ),
        ])
    });
}
