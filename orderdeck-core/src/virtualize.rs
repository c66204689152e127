//! Windowed rendering for large collections.
//!
//! The window is derived state: a contiguous index range recomputed from the
//! scroll offset on every call, never cached and never persisted. Rows are
//! positioned absolutely from `row_offset`; the adapter never reflows
//! siblings.

/// Item-count threshold above which windowing activates.
pub const VIRTUALIZE_THRESHOLD: usize = 50;

/// Rows rendered beyond each edge of the viewport.
pub const OVERSCAN_ROWS: usize = 1;

/// A contiguous index range `[start, end)` into the current item sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
    /// Whether windowing is actually in effect for this computation. Callers
    /// must not assume activation from the `enabled` flag alone.
    pub active: bool,
}

impl VirtualWindow {
    /// Compute the window for the current scroll position.
    ///
    /// Windowing activates only when `enabled` and the collection exceeds
    /// [`VIRTUALIZE_THRESHOLD`]; otherwise the full sequence is returned
    /// untouched. Heights are in terminal rows; `scroll_top` is the first
    /// visible row of virtual content. `item_height == 0` is a caller
    /// configuration error and is treated as height 1.
    pub fn compute(
        item_count: usize,
        item_height: u16,
        viewport_height: u16,
        scroll_top: usize,
        enabled: bool,
    ) -> VirtualWindow {
        if !enabled || item_count <= VIRTUALIZE_THRESHOLD {
            return VirtualWindow {
                start: 0,
                end: item_count,
                active: false,
            };
        }

        let height = item_height.max(1) as usize;
        let first_visible = scroll_top / height;
        let last_visible = (scroll_top + viewport_height as usize) / height;

        let start = first_visible.saturating_sub(OVERSCAN_ROWS).min(item_count);
        let end = (last_visible + 1 + OVERSCAN_ROWS).min(item_count);

        VirtualWindow { start, end, active: true }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Total height of the virtual content, in rows.
pub fn total_height(item_count: usize, item_height: u16) -> usize {
    item_count * item_height.max(1) as usize
}

/// Absolute row offset of an item. Each row is translated here directly.
pub fn row_offset(index: usize, item_height: u16) -> usize {
    index * item_height.max(1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_at_or_below_threshold() {
        // `enabled` alone must not activate windowing.
        let w = VirtualWindow::compute(50, 1, 10, 20, true);
        assert!(!w.active);
        assert_eq!((w.start, w.end), (0, 50));

        let w = VirtualWindow::compute(10, 1, 5, 0, true);
        assert_eq!((w.start, w.end), (0, 10));
    }

    #[test]
    fn passthrough_when_disabled() {
        let w = VirtualWindow::compute(500, 1, 10, 100, false);
        assert!(!w.active);
        assert_eq!((w.start, w.end), (0, 500));
    }

    #[test]
    fn active_window_covers_viewport_plus_overscan() {
        let w = VirtualWindow::compute(200, 1, 10, 50, true);
        assert!(w.active);
        // Visible rows 50..=60, plus one row of overscan on each edge.
        assert_eq!(w.start, 49);
        assert_eq!(w.end, 62);
    }

    #[test]
    fn window_clamps_at_edges() {
        let top = VirtualWindow::compute(200, 1, 10, 0, true);
        assert_eq!(top.start, 0);

        let bottom = VirtualWindow::compute(200, 1, 10, 195, true);
        assert_eq!(bottom.end, 200);
    }

    #[test]
    fn taller_items_shrink_the_index_range() {
        let w = VirtualWindow::compute(100, 2, 10, 20, true);
        assert!(w.active);
        // Rows 20..=30 cover item indices 10..=15.
        assert_eq!(w.start, 9);
        assert_eq!(w.end, 17);
    }

    #[test]
    fn shrinking_below_threshold_deactivates() {
        let big = VirtualWindow::compute(60, 1, 10, 40, true);
        assert!(big.active);

        // Same parameters, smaller collection: full range, no stale window.
        let small = VirtualWindow::compute(40, 1, 10, 40, true);
        assert!(!small.active);
        assert_eq!((small.start, small.end), (0, 40));
    }

    #[test]
    fn zero_item_height_does_not_divide_by_zero() {
        let w = VirtualWindow::compute(100, 0, 10, 5, true);
        assert!(w.active);
        assert!(w.len() > 0);
    }

    #[test]
    fn offsets_are_absolute() {
        assert_eq!(total_height(100, 2), 200);
        assert_eq!(row_offset(7, 2), 14);
        assert_eq!(row_offset(0, 1), 0);
    }
}
