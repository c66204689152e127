//! Domain adapters — concrete item shapes for the three reorderable panels.
//!
//! These supply the per-row data behind the generic container plus the
//! display-only summary statistics. Nothing here feeds back into the
//! ordering contract; domain actions are independent of drag state.

use orderdeck_core::SortableItem;
use serde::{Deserialize, Serialize};

/// One watchlist row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub last: f64,
    pub change_pct: f64,
    pub alert: bool,
    /// Trading-halted symbols render inertly and cannot be reordered.
    pub halted: bool,
    pub order: Option<usize>,
}

impl SortableItem for WatchlistEntry {
    fn id(&self) -> &str {
        &self.symbol
    }

    fn order(&self) -> Option<usize> {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }

    fn disabled(&self) -> bool {
        self.halted
    }
}

/// One open position row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionEntry {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub last: f64,
    pub order: Option<usize>,
}

impl PositionEntry {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.last
    }

    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.entry_price
    }

    pub fn pnl(&self) -> f64 {
        self.market_value() - self.cost_basis()
    }

    pub fn pnl_pct(&self) -> f64 {
        let basis = self.cost_basis();
        if basis == 0.0 {
            0.0
        } else {
            self.pnl() / basis * 100.0
        }
    }
}

impl SortableItem for PositionEntry {
    fn id(&self) -> &str {
        &self.symbol
    }

    fn order(&self) -> Option<usize> {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }
}

/// Strategy run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyStatus {
    Running,
    Paused,
    Stopped,
}

impl StrategyStatus {
    pub fn label(self) -> &'static str {
        match self {
            StrategyStatus::Running => "RUN",
            StrategyStatus::Paused => "PAUSE",
            StrategyStatus::Stopped => "STOP",
        }
    }
}

/// One strategy row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub id: String,
    pub name: String,
    pub status: StrategyStatus,
    pub win_rate: f64,
    pub allocated: f64,
    pub pnl: f64,
    pub order: Option<usize>,
}

impl SortableItem for StrategyEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> Option<usize> {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }
}

/// Display-only portfolio aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_pnl: f64,
    pub cost_basis: f64,
}

pub fn portfolio_summary(positions: &[PositionEntry]) -> PortfolioSummary {
    PortfolioSummary {
        total_value: positions.iter().map(PositionEntry::market_value).sum(),
        total_pnl: positions.iter().map(PositionEntry::pnl).sum(),
        cost_basis: positions.iter().map(PositionEntry::cost_basis).sum(),
    }
}

/// Display-only strategy aggregates. Win rate averages over non-stopped
/// strategies only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategySummary {
    pub running: usize,
    pub avg_win_rate: f64,
    pub total_allocated: f64,
    pub total_pnl: f64,
}

pub fn strategy_summary(strategies: &[StrategyEntry]) -> StrategySummary {
    let active: Vec<&StrategyEntry> = strategies
        .iter()
        .filter(|s| s.status != StrategyStatus::Stopped)
        .collect();
    let avg_win_rate = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|s| s.win_rate).sum::<f64>() / active.len() as f64
    };
    StrategySummary {
        running: strategies
            .iter()
            .filter(|s| s.status == StrategyStatus::Running)
            .count(),
        avg_win_rate,
        total_allocated: strategies.iter().map(|s| s.allocated).sum(),
        total_pnl: strategies.iter().map(|s| s.pnl).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(symbol: &str, quantity: f64, entry: f64, last: f64) -> PositionEntry {
        PositionEntry {
            symbol: symbol.to_string(),
            quantity,
            entry_price: entry,
            last,
            order: None,
        }
    }

    #[test]
    fn position_pnl_math() {
        let p = position("SPY", 10.0, 100.0, 110.0);
        assert_eq!(p.market_value(), 1100.0);
        assert_eq!(p.cost_basis(), 1000.0);
        assert_eq!(p.pnl(), 100.0);
        assert!((p.pnl_pct() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_basis_has_zero_pnl_pct() {
        let p = position("X", 0.0, 0.0, 50.0);
        assert_eq!(p.pnl_pct(), 0.0);
    }

    #[test]
    fn portfolio_summary_aggregates() {
        let positions = vec![
            position("A", 10.0, 100.0, 110.0),
            position("B", 5.0, 200.0, 180.0),
        ];
        let summary = portfolio_summary(&positions);
        assert_eq!(summary.total_value, 1100.0 + 900.0);
        assert_eq!(summary.total_pnl, 100.0 - 100.0);
        assert_eq!(summary.cost_basis, 2000.0);
    }

    #[test]
    fn strategy_summary_skips_stopped_win_rates() {
        let strategies = vec![
            StrategyEntry {
                id: "s1".into(),
                name: "Momentum".into(),
                status: StrategyStatus::Running,
                win_rate: 0.6,
                allocated: 10_000.0,
                pnl: 500.0,
                order: None,
            },
            StrategyEntry {
                id: "s2".into(),
                name: "MeanRev".into(),
                status: StrategyStatus::Paused,
                win_rate: 0.4,
                allocated: 5_000.0,
                pnl: -200.0,
                order: None,
            },
            StrategyEntry {
                id: "s3".into(),
                name: "Old".into(),
                status: StrategyStatus::Stopped,
                win_rate: 0.9,
                allocated: 0.0,
                pnl: 0.0,
                order: None,
            },
        ];
        let summary = strategy_summary(&strategies);
        assert_eq!(summary.running, 1);
        assert!((summary.avg_win_rate - 0.5).abs() < 1e-9);
        assert_eq!(summary.total_allocated, 15_000.0);
        assert_eq!(summary.total_pnl, 300.0);
    }

    #[test]
    fn halted_symbols_are_disabled_rows() {
        let entry = WatchlistEntry {
            symbol: "HALT".into(),
            name: "Halted Corp".into(),
            last: 1.0,
            change_pct: 0.0,
            alert: false,
            halted: true,
            order: None,
        };
        assert!(entry.disabled());
        assert_eq!(entry.id(), "HALT");
    }
}
