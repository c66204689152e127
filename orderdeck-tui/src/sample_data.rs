//! Sample data generator for the dashboard.
//!
//! Seeds the three panels and drives a small random-walk quote simulation so
//! the sortable engine is exercisable without a backend. The numbers carry
//! no business meaning.

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::{PositionEntry, StrategyEntry, StrategyStatus, WatchlistEntry};

pub fn sample_watchlist() -> Vec<WatchlistEntry> {
    let seed: &[(&str, &str, f64, f64, bool, bool)] = &[
        ("AAPL", "Apple Inc.", 228.40, 0.6, false, false),
        ("TSLA", "Tesla Inc.", 244.10, -1.8, true, false),
        ("NVDA", "NVIDIA Corp.", 131.25, 2.3, false, false),
        ("MSFT", "Microsoft Corp.", 424.90, 0.2, false, false),
        ("AMZN", "Amazon.com Inc.", 186.55, -0.4, false, false),
        ("SPY", "SPDR S&P 500", 557.30, 0.1, false, false),
        ("MRNA", "Moderna Inc.", 118.70, 0.0, false, true),
        ("QQQ", "Invesco QQQ", 478.85, 0.5, false, false),
    ];
    seed.iter()
        .enumerate()
        .map(|(index, &(symbol, name, last, change_pct, alert, halted))| WatchlistEntry {
            symbol: symbol.to_string(),
            name: name.to_string(),
            last,
            change_pct,
            alert,
            halted,
            order: Some(index),
        })
        .collect()
}

pub fn sample_positions() -> Vec<PositionEntry> {
    let seed: &[(&str, f64, f64, f64)] = &[
        ("AAPL", 50.0, 211.20, 228.40),
        ("NVDA", 120.0, 104.80, 131.25),
        ("SPY", 30.0, 548.10, 557.30),
        ("TSLA", 20.0, 262.75, 244.10),
        ("AMZN", 40.0, 192.30, 186.55),
    ];
    seed.iter()
        .enumerate()
        .map(|(index, &(symbol, quantity, entry_price, last))| PositionEntry {
            symbol: symbol.to_string(),
            quantity,
            entry_price,
            last,
            order: Some(index),
        })
        .collect()
}

pub fn sample_strategies() -> Vec<StrategyEntry> {
    let seed: &[(&str, &str, StrategyStatus, f64, f64, f64)] = &[
        ("mom-qqq", "Momentum QQQ", StrategyStatus::Running, 0.58, 25_000.0, 1_840.0),
        ("mr-spy", "Mean Reversion SPY", StrategyStatus::Running, 0.63, 40_000.0, 3_120.0),
        ("brk-nvda", "Breakout NVDA", StrategyStatus::Paused, 0.47, 15_000.0, -620.0),
        ("pairs-tech", "Pairs AAPL/MSFT", StrategyStatus::Running, 0.55, 20_000.0, 410.0),
        ("vol-crush", "Vol Crush Weekly", StrategyStatus::Stopped, 0.71, 0.0, 0.0),
        ("grid-amzn", "Grid AMZN", StrategyStatus::Paused, 0.51, 10_000.0, -95.0),
    ];
    seed.iter()
        .enumerate()
        .map(|(index, &(id, name, status, win_rate, allocated, pnl))| StrategyEntry {
            id: id.to_string(),
            name: name.to_string(),
            status,
            win_rate,
            allocated,
            pnl,
            order: Some(index),
        })
        .collect()
}

/// A fresh watchlist row for a symbol typed into the add-symbol prompt.
pub fn new_watchlist_entry(symbol: &str) -> WatchlistEntry {
    WatchlistEntry {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        last: 0.0,
        change_pct: 0.0,
        alert: false,
        halted: false,
        order: None,
    }
}

/// One step of the quote random walk: ±0.5% on each live symbol.
pub fn tick_quotes(
    watchlist: &mut [WatchlistEntry],
    positions: &mut [PositionEntry],
    rng: &mut StdRng,
) {
    for entry in watchlist.iter_mut() {
        if entry.halted || entry.last == 0.0 {
            continue;
        }
        let step = rng.gen_range(-0.005..0.005);
        entry.last *= 1.0 + step;
        entry.change_pct += step * 100.0;
    }
    for position in positions.iter_mut() {
        let step = rng.gen_range(-0.005..0.005);
        position.last *= 1.0 + step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seeds_have_stable_unique_ids() {
        let watchlist = sample_watchlist();
        let unique: std::collections::HashSet<&str> =
            watchlist.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(unique.len(), watchlist.len());

        let strategies = sample_strategies();
        let unique: std::collections::HashSet<&str> =
            strategies.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(unique.len(), strategies.len());
    }

    #[test]
    fn halted_symbols_do_not_tick() {
        let mut watchlist = sample_watchlist();
        let mut positions = sample_positions();
        let halted_last = watchlist.iter().find(|e| e.halted).unwrap().last;

        let mut rng = StdRng::seed_from_u64(7);
        tick_quotes(&mut watchlist, &mut positions, &mut rng);

        assert_eq!(watchlist.iter().find(|e| e.halted).unwrap().last, halted_last);
    }

    #[test]
    fn tick_moves_live_quotes() {
        let mut watchlist = sample_watchlist();
        let mut positions = sample_positions();
        let before = watchlist[0].last;

        let mut rng = StdRng::seed_from_u64(7);
        tick_quotes(&mut watchlist, &mut positions, &mut rng);

        assert_ne!(watchlist[0].last, before);
        // Step is bounded to half a percent.
        assert!((watchlist[0].last - before).abs() / before < 0.006);
    }
}
