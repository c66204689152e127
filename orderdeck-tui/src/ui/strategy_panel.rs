//! Panel 3 — Strategies: reorderable strategy rows with run controls.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::domain::{strategy_summary, StrategyEntry, StrategyStatus};
use crate::theme;
use crate::ui::{self, HEADER_ROWS};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.strategies;
    let summary = strategy_summary(list.sort.visible());

    let header = Line::from(vec![
        Span::styled(format!("{} running", summary.running), theme::positive()),
        Span::styled(
            format!(
                " | avg win {:.0}% | alloc ${:.0}",
                summary.avg_win_rate * 100.0,
                summary.total_allocated
            ),
            theme::muted(),
        ),
        Span::styled(" | P&L ", theme::muted()),
        Span::styled(
            format!("{:+.2}", summary.total_pnl),
            theme::pnl_style(summary.total_pnl),
        ),
        Span::styled("  [s]tart/pause [S]top", theme::muted()),
    ]);

    let columns = Line::from(Span::styled(
        format!(
            "   {:<6} {:<20} {:>6} {:>10} {:>10}",
            "State", "Strategy", "Win%", "Alloc", "P&L"
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

    ui::widgets::sortable_list::render(f, list_area, list, |strategy: &StrategyEntry, _index| {
        let status_style = match strategy.status {
            StrategyStatus::Running => theme::positive(),
            StrategyStatus::Paused => theme::warning(),
            StrategyStatus::Stopped => theme::muted(),
        };
        Line::from(vec![
            Span::styled(format!("{:<6} ", strategy.status.label()), status_style),
            Span::styled(
                format!("{:<20} ", ui::truncate(&strategy.name, 20)),
                theme::text(),
            ),
            Span::styled(
                format!("{:>5.0}% ", strategy.win_rate * 100.0),
                theme::text_secondary(),
            ),
            Span::styled(format!("{:>10.0} ", strategy.allocated), theme::text_secondary()),
            Span::styled(
                format!("{:>+10.2}", strategy.pnl),
                theme::pnl_style(strategy.pnl),
            ),
        ])
    });
}
