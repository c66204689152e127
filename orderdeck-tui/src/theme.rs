//! Neon-on-dark theme tokens for the OrderDeck TUI.
//!
//! # Color Palette
//! - **Accent**: electric cyan (focus, highlights, drop targets)
//! - **Positive**: neon green (gains, running strategies)
//! - **Negative**: hot pink (losses, errors)
//! - **Warning**: neon orange (alerts, halted rows)
//! - **Muted**: steel blue (secondary text, handles, disabled)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active { accent() } else { muted() }
}

pub fn panel_title(active: bool) -> Style {
    if active { accent_bold() } else { muted() }
}

/// Style for a signed value: green for gains, pink for losses.
pub fn pnl_style(value: f64) -> Style {
    if value >= 0.0 { positive() } else { negative() }
}

/// The row being dragged: reduced emphasis, keeps its slot until the drop.
pub fn drag_active() -> Style {
    Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::DIM)
}

/// The row currently under the drag.
pub fn drop_target() -> Style {
    accent_bold().add_modifier(Modifier::UNDERLINED)
}

pub fn cursor_row() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

/// Inert rows: no handle, no drag, dimmed.
pub fn disabled_row() -> Style {
    muted().add_modifier(Modifier::DIM)
}

pub fn selection_badge() -> Style {
    warning().add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pnl_style_splits_on_sign() {
        assert_eq!(pnl_style(12.5), positive());
        assert_eq!(pnl_style(-0.01), negative());
        assert_eq!(pnl_style(0.0), positive());
    }

    #[test]
    fn border_tracks_focus() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
    }
}
