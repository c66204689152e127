//! Panel 1 — Watchlist: reorderable symbol rows with alerts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::{self, HEADER_ROWS};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.watchlist;
    let alert_count = list.sort.visible().iter().filter(|e| e.alert).count();

    let mut header = vec![
        Span::styled(format!("{} symbols", list.sort.len()), theme::accent()),
        Span::styled(format!(" | {alert_count} alerts"), theme::muted()),
    ];
    if list.sort.selected_count() > 0 {
        header.push(Span::styled(
            format!(" | {} selected", list.sort.selected_count()),
            theme::selection_badge(),
        ));
    }
    header.push(Span::styled(
        "  [Space]grab/drop [a]lert [d]rop [n]ew",
        theme::muted(),
    ));

    let columns = Line::from(Span::styled(
        format!(
            "   {:<6} {:<18} {:>10} {:>7}  {:<5}",
            "Sym", "Name", "Last", "Chg%", "Alert"
        ),
        theme::accent_bold(),
    ));

    let para = Paragraph::new(vec![Line::from(header), columns]);
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

    ui::widgets::sortable_list::render(f, list_area, list, |entry, _index| {
        let alert = if entry.alert { "⚠" } else { " " };
        let flag = if entry.halted { " HALT" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<6} ", entry.symbol), theme::text()),
            Span::styled(
                format!("{:<18} ", ui::truncate(&entry.name, 18)),
                theme::text_secondary(),
            ),
            Span::styled(format!("{:>10.2} ", entry.last), theme::text()),
            Span::styled(
                format!("{:>+6.2}% ", entry.change_pct),
                theme::pnl_style(entry.change_pct),
            ),
            Span::styled(format!(" {alert}"), theme::warning()),
            Span::styled(flag.to_string(), theme::warning()),
        ])
    });
}
